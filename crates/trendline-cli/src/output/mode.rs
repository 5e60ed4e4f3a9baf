use crate::cli::{Commands, DemoCommand, ToolCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    match command {
        Commands::Trends { json, .. }
        | Commands::Tool {
            command: ToolCommand::SpendTrends { json, .. },
        }
        | Commands::Demo {
            command: DemoCommand::Trends { json, .. },
        } => OutputMode::from_flag(*json),
    }
}
