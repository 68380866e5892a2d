//! Process-wide constants for the request simulator.

/// Version reported in the `User-Agent` header.
pub const VERSION: &str = "1.0";

/// Tool name reported in the `User-Agent` header.
pub const TOOL_NAME: &str = "Fight-client";

/// Full `User-Agent` value attached to every materialized request.
pub const USER_AGENT_VALUE: &str = "Fight-client/1.0";

pub const CONTENT_TYPE: &str = "Content-Type";

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORM: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_is_tool_name_and_version() {
        assert_eq!(USER_AGENT_VALUE, format!("{TOOL_NAME}/{VERSION}"));
    }
}
