use super::types::ScanlensError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Process exit code used when the error ends a one-shot command.
    pub exit_code: i32,
}

impl ScanlensError {
    /// Classify this error into a stable type label and exit code.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ScanlensError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            ScanlensError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                exit_code: 2,
            },

            // Problems with the uploaded export itself
            ScanlensError::InvalidInput(_) => ErrorClassification {
                error_type: "InvalidInputError",
                exit_code: 3,
            },
            ScanlensError::InvalidDate(_) => ErrorClassification {
                error_type: "InvalidDateError",
                exit_code: 3,
            },
            ScanlensError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 3,
            },
            ScanlensError::Csv(_) => ErrorClassification {
                error_type: "CsvError",
                exit_code: 3,
            },
            ScanlensError::MissingField(_) => ErrorClassification {
                error_type: "MissingFieldError",
                exit_code: 4,
            },

            ScanlensError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            ScanlensError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                exit_code: 1,
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.classify().exit_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_exit_code() {
        let err = ScanlensError::Config("bad separator".into());
        let class = err.classify();
        assert_eq!(class.error_type, "ConfigError");
        assert_eq!(class.exit_code, 2);
    }

    #[test]
    fn test_input_errors_share_exit_code() {
        assert_eq!(ScanlensError::InvalidInput("not an array".into()).exit_code(), 3);
        assert_eq!(ScanlensError::InvalidDate("2024-13-01".into()).exit_code(), 3);
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ScanlensError::from(json_err).exit_code(), 3);
    }

    #[test]
    fn test_missing_field_exit_code() {
        let err = ScanlensError::MissingField("severity".into());
        assert_eq!(err.classify().error_type, "MissingFieldError");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_io_error_is_generic_failure() {
        let err = ScanlensError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_display_includes_detail() {
        let err = ScanlensError::MissingField("created_at".into());
        assert_eq!(err.to_string(), "Missing field: created_at");
    }
}
