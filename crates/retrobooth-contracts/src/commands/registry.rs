#[derive(Clone, Copy, Debug)]
pub(crate) struct CommandSpec {
    pub command: &'static str,
    pub action: &'static str,
}

/// Commands whose whole remainder is one free-text argument.
pub(crate) const RAW_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "style",
        action: "switch_style",
    },
    CommandSpec {
        command: "video",
        action: "request_video",
    },
    CommandSpec {
        command: "animate",
        action: "request_video",
    },
    CommandSpec {
        command: "key",
        action: "set_credential",
    },
];

pub(crate) const SINGLE_PATH_COMMANDS: &[CommandSpec] = &[CommandSpec {
    command: "save",
    action: "save",
}];

pub(crate) const CAPTURE_COMMAND: CommandSpec = CommandSpec {
    command: "capture",
    action: "capture",
};

pub(crate) const NO_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "reset",
        action: "reset",
    },
    CommandSpec {
        command: "styles",
        action: "list_styles",
    },
    CommandSpec {
        command: "status",
        action: "status",
    },
    CommandSpec {
        command: "wait",
        action: "wait",
    },
    CommandSpec {
        command: "help",
        action: "help",
    },
    CommandSpec {
        command: "quit",
        action: "quit",
    },
    CommandSpec {
        command: "exit",
        action: "quit",
    },
];

pub const BOOTH_HELP_COMMANDS: &[&str] = &[
    "/capture <path> [style]",
    "/style <id>",
    "/video <prompt>",
    "/key <credential>",
    "/save <dir>",
    "/styles",
    "/status",
    "/wait",
    "/reset",
    "/quit",
];
