use super::{Command, CommandContext, CommandError};

#[derive(Clone, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn help(&self) -> &'static str {
        "Print working directory."
    }

    fn execute(&self, _: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
        writeln!(ctx.streams.out, "{}", ctx.state.cwd().display())?;
        Ok(0)
    }
}
