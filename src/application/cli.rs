#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::GatewayName;
use crate::domain::models::Language;
use crate::domain::models::ResumeSection;

/// What the user asked for, once config has been loaded.
#[derive(Debug, PartialEq)]
pub enum Intent {
    Resume {
        file: Option<String>,
        target_role: String,
        copy: Option<ResumeSection>,
    },
    Code {
        file: String,
        language: Option<Language>,
        categories: Vec<CodeAnalysisCategory>,
    },
    Tutor {
        file: String,
        language: Option<Language>,
    },
    Models,
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn arg_file(required: bool) -> Arg {
    let mut help = "Path to the file to analyze.";
    if !required {
        help = "Path to the file to analyze. Reads from stdin when omitted or set to '-'.";
    }

    return Arg::new("file")
        .short('f')
        .long("file")
        .num_args(1)
        .required(required)
        .help(help);
}

fn arg_language() -> Arg {
    return Arg::new("language")
        .short('l')
        .long("language")
        .num_args(1)
        .help("Language of the code. Inferred from the file extension when omitted.")
        .value_parser(PossibleValuesParser::new(Language::VARIANTS));
}

fn subcommand_resume() -> Command {
    return Command::new("resume")
        .about("Evaluate a resume: score, ATS compatibility, strengths, weaknesses, and an improvement plan.")
        .arg(arg_file(false))
        .arg(
            Arg::new("role")
                .short('r')
                .long("role")
                .num_args(1)
                .help("Target job role to evaluate the resume against."),
        )
        .arg(
            Arg::new("copy")
                .short('y')
                .long("copy")
                .num_args(1)
                .help("Copies a list from the evaluation to the clipboard, joined with commas.")
                .value_parser(PossibleValuesParser::new(ResumeSection::VARIANTS)),
        );
}

fn subcommand_code() -> Command {
    return Command::new("code")
        .about("Analyze source code. Each category is requested independently.")
        .arg(arg_file(true))
        .arg(arg_language())
        .arg(
            Arg::new("category")
                .short('k')
                .long("category")
                .action(ArgAction::Append)
                .help("Analysis to run. Can be repeated. [default: explanation]")
                .value_parser(PossibleValuesParser::new(CodeAnalysisCategory::VARIANTS)),
        );
}

fn subcommand_tutor() -> Command {
    return Command::new("tutor")
        .about("Chat with a programming tutor about a file. Type /help inside the chat for commands.")
        .arg(arg_file(true))
        .arg(arg_language());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("coachlm")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_resume())
        .subcommand(subcommand_code())
        .subcommand(subcommand_tutor())
        .subcommand(Command::new("models").about("Checks the gateway is reachable and lists its models."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("COACHLM_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Gateway.to_string())
                .short('g')
                .long(ConfigKey::Gateway.to_string())
                .env("COACHLM_GATEWAY")
                .num_args(1)
                .help(format!("The gateway hosting the models to connect to. [default: {}]", Config::default(ConfigKey::Gateway)))
                .value_parser(PossibleValuesParser::new(GatewayName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GatewayHealthCheckTimeout.to_string())
                .long(ConfigKey::GatewayHealthCheckTimeout.to_string())
                .env("COACHLM_GATEWAY_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when doing a healthcheck for a gateway. [default: {}]", Config::default(ConfigKey::GatewayHealthCheckTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("COACHLM_GEMINI_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Google AI Studio API key used to authenticate with Gemini. Required.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("COACHLM_GEMINI_URL")
                .num_args(1)
                .help(format!("Gemini API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ResumeModel.to_string())
                .long(ConfigKey::ResumeModel.to_string())
                .env("COACHLM_RESUME_MODEL")
                .num_args(1)
                .help(format!("Model used to evaluate resumes. [default: {}]", Config::default(ConfigKey::ResumeModel)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::CodeModel.to_string())
                .long(ConfigKey::CodeModel.to_string())
                .env("COACHLM_CODE_MODEL")
                .num_args(1)
                .help(format!("Model used for code analysis and tutoring. [default: {}]", Config::default(ConfigKey::CodeModel)))
                .global(true),
        );
}

fn parse_language(matches: &ArgMatches) -> Option<Language> {
    return matches
        .get_one::<String>("language")
        .and_then(|language| return Language::parse(language));
}

fn parse_categories(matches: &ArgMatches) -> Vec<CodeAnalysisCategory> {
    let mut categories: Vec<CodeAnalysisCategory> = vec![];
    if let Some(values) = matches.get_many::<String>("category") {
        for value in values {
            if let Some(category) = CodeAnalysisCategory::parse(value) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
    }

    if categories.is_empty() {
        categories.push(CodeAnalysisCategory::Explanation);
    }

    return categories;
}

pub fn intent_from_matches(name: &str, subcmd_matches: &ArgMatches) -> Option<Intent> {
    let file = subcmd_matches
        .get_one::<String>("file")
        .map(|file| return file.to_string());

    match name {
        "resume" => {
            return Some(Intent::Resume {
                file,
                target_role: subcmd_matches
                    .get_one::<String>("role")
                    .map(|role| return role.to_string())
                    .unwrap_or_default(),
                copy: subcmd_matches
                    .get_one::<String>("copy")
                    .and_then(|section| return ResumeSection::parse(section)),
            });
        }
        "code" => {
            return Some(Intent::Code {
                file: file.unwrap_or_default(),
                language: parse_language(subcmd_matches),
                categories: parse_categories(subcmd_matches),
            });
        }
        "tutor" => {
            return Some(Intent::Tutor {
                file: file.unwrap_or_default(),
                language: parse_language(subcmd_matches),
            });
        }
        "models" => return Some(Intent::Models),
        _ => return None,
    }
}

pub async fn parse() -> Result<Option<Intent>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some((name, subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(intent_from_matches(name, subcmd_matches));
        }
        None => {
            build().print_long_help()?;
            return Ok(None);
        }
    }
}
