use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "window": {
                "type": "object",
                "properties": {
                    "lookback_days": { "type": "integer", "minimum": 0, "maximum": 3650 }
                }
            },
            "flatten": {
                "type": "object",
                "properties": {
                    "separator": { "type": "string", "minLength": 1 }
                }
            },
            "render": {
                "type": "object",
                "properties": {
                    "max_rows": { "type": "integer", "minimum": 0 },
                    "cell_width": { "type": "integer", "minimum": 4 },
                    "bar_width": { "type": "integer", "minimum": 1 }
                }
            },
            "limits": {
                "type": "object",
                "properties": {
                    "max_input_bytes": { "type": "integer", "minimum": 1 }
                }
            },
            "reports": {
                "type": "object",
                "properties": {
                    "severities": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1
                    },
                    "sast": { "$ref": "#/$defs/report" },
                    "sca": { "$ref": "#/$defs/report" },
                    "inspector": { "$ref": "#/$defs/report" },
                    "inventory": { "$ref": "#/$defs/report" }
                }
            }
        },
        "$defs": {
            "report": {
                "type": "object",
                "properties": {
                    "display_columns": { "type": "array", "items": { "type": "string" } }
                }
            }
        }
    })
});
