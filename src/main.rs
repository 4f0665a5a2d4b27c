use std::{
    io::{self, StdinLock, Stdout, Write},
    process,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{info, warn};

use lancher::{
    ConfigureArgs, Logging, PROJECT_NAME, PROJECT_VERSION, PROJECT_VERSION_HASH, Settings,
    configure, show_configuration,
    tui::{CommandOutput, PromptResult, Prompter, SelectOption, Spinner, StdinTerminal},
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Command,

    /// Verbose
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Pick one option and print its value
    Select {
        prompt: String,
        /// Options, as `value` or `value=label`
        #[arg(required = true)]
        options: Vec<SelectOption>,
    },

    /// Pick any number of options and print their values, one per line
    #[command(visible_alias = "multi-select")]
    Multi {
        prompt: String,
        /// Options, as `value` or `value=label`
        #[arg(required = true)]
        options: Vec<SelectOption>,
    },

    /// Read a line of text and print it
    Text {
        prompt: String,
        /// Value used when nothing is typed
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Ask a yes/no question and print the answer
    Confirm {
        prompt: String,
        /// Treat a blank answer as yes
        #[arg(long)]
        default_yes: bool,
    },

    /// Run a command behind a spinner
    Spin {
        /// Text shown next to the spinner
        #[arg(short, long, default_value = "Working...")]
        message: String,
        /// Print the command's output as it is produced instead of animating
        #[arg(short, long)]
        print: bool,
        /// Program and arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Show settings
    #[command(visible_alias = "show-config")]
    ShowConfiguration,

    /// Change settings
    Configure(ConfigureArgs),
}

fn init_logging(verbose: bool) -> Result<()> {
    if verbose {
        Logging::new().with_debug_mode(true).start()
    } else {
        let file_name = format!("{PROJECT_NAME}.log");
        Logging::new().with_file(file_name).start()
    }
}

/// Prints the answer, or a notice if the prompt was cancelled.
fn report<T>(answer: PromptResult<T>, print: impl FnOnce(T)) -> Result<()> {
    match answer.context("Prompt failed")? {
        Some(value) => print(value),
        None => println!("Cancelled."),
    }
    Ok(())
}

fn prompter(settings: &Settings) -> Prompter<StdinTerminal, StdinLock<'static>, Stdout> {
    Prompter::stdio().with_fallback_only(settings.fallback_only)
}

fn run_spinner(message: &str, print: bool, command: &[String], settings: &Settings) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        bail!("No command given");
    };

    // Printed output would tear through the animation, so it runs bare.
    let spinner = Spinner::new(message).with_interval(settings.spinner_interval());
    if print {
        println!("{message}");
    } else {
        spinner.start();
    }

    info!("running {program} {}", args.join(" "));
    let mut sink = CommandOutput::new(print);
    let status = match sink.run(process::Command::new(program).args(args)) {
        Ok(status) => status,
        Err(e) => {
            spinner.fail(&format!("Unable to run {program}"));
            return Err(e).with_context(|| format!("Unable to run {program}"));
        }
    };

    if status.success() {
        spinner.success(message);
        return Ok(());
    }

    spinner.fail(message);
    if !print {
        io::stderr()
            .write_all(sink.captured().as_bytes())
            .context("Unable to print command output")?;
    }
    bail!("{program} failed: {status}")
}

fn main() -> Result<()> {
    let args = UserArgs::parse();

    init_logging(args.verbose)?;
    info!("{PROJECT_NAME} {PROJECT_VERSION} ({PROJECT_VERSION_HASH})");

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("unable to load settings, using defaults: {e:#}");
        Settings::default()
    });
    settings.apply();

    match args.command {
        Command::Select { prompt, options } => report(
            prompter(&settings).select(&prompt, &options),
            |value| println!("{value}"),
        ),
        Command::Multi { prompt, options } => report(
            prompter(&settings).multi_select(&prompt, &options),
            |values| {
                for value in values {
                    println!("{value}");
                }
            },
        ),
        Command::Text { prompt, default } => report(
            prompter(&settings).text(&prompt, &default),
            |value| println!("{value}"),
        ),
        Command::Confirm {
            prompt,
            default_yes,
        } => {
            let yes = prompter(&settings)
                .confirm(&prompt, default_yes)
                .context("Prompt failed")?;
            println!("{}", if yes { "yes" } else { "no" });
            Ok(())
        }
        Command::Spin {
            message,
            print,
            command,
        } => run_spinner(&message, print, &command, &settings),
        Command::ShowConfiguration => show_configuration(),
        Command::Configure(configure_args) => configure(&configure_args),
    }
}
