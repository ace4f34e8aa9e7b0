use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::repl::ReplSession;

pub fn handle_shell(settings: ViewSettings) -> Result<(), ScanlensError> {
    ReplSession::new(settings).run()
}
