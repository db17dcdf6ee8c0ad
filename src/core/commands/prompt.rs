use super::{Command, CommandContext, CommandError};

#[derive(Clone, Default)]
pub struct PromptCommand;

impl Command for PromptCommand {
    fn name(&self) -> &'static str {
        "prompt"
    }

    fn help(&self) -> &'static str {
        "Change prompt. Use $P for path, $G for '>'. (prompt <format>)"
    }

    fn execute(&self, args: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
        let args = args.trim();
        if args.is_empty() {
            writeln!(ctx.streams.out, "{}", ctx.state.prompt_format())?;
        } else {
            ctx.state.set_prompt_format(args);
        }
        Ok(0)
    }
}
