use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    wasmpak completions bash > ~/.bash_completion.d/wasmpak\n\n\
                  Generate zsh completions:\n    wasmpak completions zsh > ~/.zfunc/_wasmpak\n\n\
                  Generate fish completions:\n    wasmpak completions fish > ~/.config/fish/completions/wasmpak.fish\n\n\
                  Generate PowerShell completions:\n    wasmpak completions powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
