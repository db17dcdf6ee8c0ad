use super::{Command, CommandContext, CommandError};

#[derive(Clone, Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn help(&self) -> &'static str {
        "Echo text. (echo <text>)"
    }

    fn execute(&self, args: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
        writeln!(ctx.streams.out, "{}", args)?;
        Ok(0)
    }
}
