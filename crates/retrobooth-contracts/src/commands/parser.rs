use std::collections::BTreeMap;

use serde_json::Value;

use super::registry::{
    CommandSpec, CAPTURE_COMMAND, NO_ARG_COMMANDS, RAW_ARG_COMMANDS, SINGLE_PATH_COMMANDS,
};

/// One parsed line of booth input. Plain text becomes a `remix` with `prompt` set.
#[derive(Debug, Clone, PartialEq)]
pub struct BoothCommand {
    pub action: String,
    pub raw: String,
    pub prompt: Option<String>,
    pub command_args: BTreeMap<String, Value>,
}

impl BoothCommand {
    fn new(action: &str, raw: &str) -> Self {
        Self {
            action: action.to_string(),
            raw: raw.to_string(),
            prompt: None,
            command_args: BTreeMap::new(),
        }
    }

    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.command_args
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn find_action(command: &str, specs: &[CommandSpec]) -> Option<&'static str> {
    specs
        .iter()
        .find(|spec| spec.command == command)
        .map(|spec| spec.action)
}

fn parse_path_args(arg: &str) -> Vec<String> {
    if arg.trim().is_empty() {
        return Vec::new();
    }
    match shell_words::split(arg) {
        Ok(parts) => parts
            .into_iter()
            .filter(|value| !value.is_empty())
            .collect(),
        Err(_) => arg
            .split_whitespace()
            .map(str::to_string)
            .filter(|value| !value.is_empty())
            .collect(),
    }
}

fn parse_single_path_arg(arg: &str) -> String {
    let parts = parse_path_args(arg);
    match parts.len() {
        0 => String::new(),
        1 => parts[0].clone(),
        _ => parts.join(" "),
    }
}

pub fn parse_command(text: &str) -> BoothCommand {
    let raw_trimmed = text.trim();
    if raw_trimmed.is_empty() {
        return BoothCommand::new("noop", text);
    }

    if let Some(slash_tail) = raw_trimmed.strip_prefix('/') {
        let command_len = slash_tail
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .count();
        if command_len > 0 {
            let command = slash_tail[..command_len].to_ascii_lowercase();
            let arg = slash_tail[command_len..].trim();

            if let Some(action) = find_action(&command, RAW_ARG_COMMANDS) {
                let mut parsed = BoothCommand::new(action, text);
                match action {
                    "request_video" => parsed.prompt = Some(arg.to_string()),
                    "switch_style" => {
                        parsed
                            .command_args
                            .insert("style".to_string(), Value::String(arg.to_string()));
                    }
                    _ => {
                        parsed
                            .command_args
                            .insert("value".to_string(), Value::String(arg.to_string()));
                    }
                }
                return parsed;
            }

            if command == CAPTURE_COMMAND.command {
                let mut parsed = BoothCommand::new(CAPTURE_COMMAND.action, text);
                let mut parts = parse_path_args(arg).into_iter();
                parsed.command_args.insert(
                    "path".to_string(),
                    Value::String(parts.next().unwrap_or_default()),
                );
                parsed.command_args.insert(
                    "style".to_string(),
                    parts.next().map(Value::String).unwrap_or(Value::Null),
                );
                return parsed;
            }

            if let Some(action) = find_action(&command, SINGLE_PATH_COMMANDS) {
                let mut parsed = BoothCommand::new(action, text);
                parsed.command_args.insert(
                    "path".to_string(),
                    Value::String(parse_single_path_arg(arg)),
                );
                return parsed;
            }

            if let Some(action) = find_action(&command, NO_ARG_COMMANDS) {
                return BoothCommand::new(action, text);
            }

            let mut parsed = BoothCommand::new("unknown", text);
            parsed
                .command_args
                .insert("command".to_string(), Value::String(command));
            parsed
                .command_args
                .insert("arg".to_string(), Value::String(arg.to_string()));
            return parsed;
        }
    }

    let mut parsed = BoothCommand::new("remix", text);
    parsed.prompt = Some(raw_trimmed.to_string());
    parsed
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::parse_command;

    #[test]
    fn plain_text_is_a_remix_prompt() {
        let parsed = parse_command("  add sunglasses  ");
        assert_eq!(parsed.action, "remix");
        assert_eq!(parsed.prompt.as_deref(), Some("add sunglasses"));
    }

    #[test]
    fn blank_line_is_noop() {
        assert_eq!(parse_command("   ").action, "noop");
    }

    #[test]
    fn capture_with_quoted_path_and_style() {
        let parsed = parse_command("/capture \"/tmp/my photo.png\" 90s");
        assert_eq!(parsed.action, "capture");
        assert_eq!(parsed.command_args["path"], json!("/tmp/my photo.png"));
        assert_eq!(parsed.command_args["style"], json!("90s"));
    }

    #[test]
    fn capture_without_style_leaves_style_null() {
        let parsed = parse_command("/capture a.jpg");
        assert_eq!(parsed.arg_str("path"), Some("a.jpg"));
        assert_eq!(parsed.command_args["style"], json!(null));
        assert_eq!(parsed.arg_str("style"), None);
    }

    #[test]
    fn style_and_video_commands_keep_raw_remainder() {
        let style = parse_command("/style noir");
        assert_eq!(style.action, "switch_style");
        assert_eq!(style.arg_str("style"), Some("noir"));

        let video = parse_command("/video The person winks and the lasers flash");
        assert_eq!(video.action, "request_video");
        assert_eq!(
            video.prompt.as_deref(),
            Some("The person winks and the lasers flash")
        );
        assert_eq!(parse_command("/animate wave").action, "request_video");
    }

    #[test]
    fn key_and_save_commands() {
        let key = parse_command("/key sk-test");
        assert_eq!(key.action, "set_credential");
        assert_eq!(key.arg_str("value"), Some("sk-test"));

        let save = parse_command("/save \"/tmp/out dir\"");
        assert_eq!(save.action, "save");
        assert_eq!(save.command_args["path"], json!("/tmp/out dir"));
    }

    #[test]
    fn no_arg_commands_are_case_insensitive() {
        assert_eq!(parse_command("/RESET").action, "reset");
        assert_eq!(parse_command("/styles").action, "list_styles");
        assert_eq!(parse_command("/exit").action, "quit");
        assert_eq!(parse_command("/wait").action, "wait");
    }

    #[test]
    fn unknown_command_reports_name_and_arg() {
        let parsed = parse_command("/magic foo bar");
        assert_eq!(parsed.action, "unknown");
        assert_eq!(parsed.command_args["command"], json!("magic"));
        assert_eq!(parsed.command_args["arg"], json!("foo bar"));
    }
}
