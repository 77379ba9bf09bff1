#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use super::CodeAnalysisCategory;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit() || cmd.is_clear() || cmd.is_analyze() || cmd.is_copy() || cmd.is_help() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/c", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_analyze(&self) -> bool {
        return ["/a", "/analyze"].contains(&self.command.as_str());
    }

    pub fn is_copy(&self) -> bool {
        return ["/cp", "/copy"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    /// Category named by `/analyze`. Defaults to an explanation when no
    /// argument is given.
    pub fn category(&self) -> Option<CodeAnalysisCategory> {
        if self.args.is_empty() {
            return Some(CodeAnalysisCategory::Explanation);
        }

        return CodeAnalysisCategory::parse(&self.args[0]);
    }
}
