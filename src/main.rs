use clap::{Parser, Subcommand};
use log::debug;
use std::io::Read;
use std::sync::Arc;

use sleep_insights::{
    api::latest_result, config::ApiConfig, render::render_report, Answers, AppConfig,
    HttpBackend, ParserKind, Report, Session, SessionStore, SleepBackend, SleepError,
    SleepReport,
};

#[derive(Parser)]
#[command(name = "sleep-insights")]
#[command(about = "Sleep recommendation parser and sleep analysis API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse recommendation text from a file or stdin
    Parse {
        /// File to read, `-` or nothing for stdin
        file: Option<String>,
        /// Show cards only
        #[arg(long)]
        cards: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Effectiveness to show when the text has none
        #[arg(long)]
        effectiveness: Option<f64>,
    },
    /// Create an account and log in
    Signup {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the user
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the logged-in user
    Logout,
    /// Show the latest stored recommendations
    Latest {
        #[arg(long)]
        cards: bool,
        #[arg(long)]
        json: bool,
    },
    /// List stored results
    History,
    /// Submit questionnaire answers
    Predict {
        /// Answer as `question=answer`, repeatable
        #[arg(long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, String)>,
        #[arg(long)]
        cards: bool,
        #[arg(long)]
        json: bool,
    },
    /// List questionnaire questions
    Questions,
    /// Ask the sleep assistant
    Chat { message: String },
    /// Translate a message
    Translate {
        message: String,
        /// Target language code, e.g. `hi`
        #[arg(long)]
        lang: String,
    },
    /// Check the backend
    Health,
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(q, a)| (q.trim().to_string(), a.trim().to_string()))
        .ok_or_else(|| format!("expected question=answer, got {:?}", raw))
}

fn read_input(file: Option<&str>) -> Result<String, std::io::Error> {
    let bytes = match file {
        None | Some("-") => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        Some(path) => std::fs::read(path)?,
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn print_report(report: &Report, json: bool) -> Result<(), serde_json::Error> {
    if !json {
        print!("{}", render_report(report));
        return Ok(());
    }
    let output = match report {
        Report::Dashboard(parsed) => serde_json::to_string_pretty(parsed)?,
        Report::Cards(cards) => serde_json::to_string_pretty(cards)?,
    };
    println!("{}", output);
    Ok(())
}

fn view(cards: bool, config: &AppConfig) -> ParserKind {
    if cards {
        ParserKind::Cards
    } else {
        config.parser.view
    }
}

fn connect(config: &ApiConfig) -> Result<Arc<dyn SleepBackend>, SleepError> {
    Ok(Arc::new(HttpBackend::new(config)?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    run(cli, config).await
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    debug!("using backend {}", config.api.base_url);
    let store = SessionStore::new(config.session.path.clone());

    match cli.command {
        Commands::Parse {
            file,
            cards,
            json,
            effectiveness,
        } => {
            let text = read_input(file.as_deref())?;
            let effectiveness = effectiveness.unwrap_or(config.parser.default_effectiveness);
            let report = SleepReport::builder()
                .text(text)
                .view(view(cards, &config))
                .default_effectiveness(effectiveness)
                .build()
                .await?;
            print_report(&report, json)?;
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let user = connect(&config.api)?.signup(&name, &email, &password).await?;
            println!("Welcome, {}!", user.name);
            store.save(&Session::logged_in(user)).await?;
        }
        Commands::Login { email, password } => {
            let user = connect(&config.api)?.login(&email, &password).await?;
            println!("Logged in as {}", user.name);
            store.save(&Session::logged_in(user)).await?;
        }
        Commands::Logout => {
            store.clear().await?;
            println!("Logged out");
        }
        Commands::Latest { cards, json } => {
            let session = store.load().await?;
            let user = session.require_user()?;
            let report = SleepReport::builder()
                .latest_for(&user.email)
                .view(view(cards, &config))
                .backend(connect(&config.api)?)
                .build()
                .await?;
            if report.is_empty() && !json {
                println!("You haven't taken the quiz yet.");
            } else {
                print_report(&report, json)?;
            }
        }
        Commands::History => {
            let session = store.load().await?;
            let user = session.require_user()?;
            let results = connect(&config.api)?.results(&user.email).await?;
            let latest_id = latest_result(&results).map(|r| r.id);
            for result in &results {
                let marker = if Some(result.id) == latest_id { "*" } else { " " };
                println!(
                    "{} {}  {} ({})",
                    marker,
                    result.timestamp,
                    result.summary(),
                    result.rating().label()
                );
            }
        }
        Commands::Predict {
            answers,
            cards,
            json,
        } => {
            let session = store.load().await?;
            let user = session.require_user()?;
            let answers: Answers = answers.into_iter().collect();
            let report = SleepReport::builder()
                .predict(&user.email, answers)
                .view(view(cards, &config))
                .backend(connect(&config.api)?)
                .build()
                .await?;
            print_report(&report, json)?;
        }
        Commands::Questions => {
            let questions = connect(&config.api)?.questions().await?;
            for (index, question) in questions.iter().enumerate() {
                println!("{}. {}", index + 1, question.question);
                for option in &question.options {
                    println!("   - {}", option);
                }
            }
        }
        Commands::Chat { message } => {
            println!("{}", connect(&config.api)?.chat(&message).await?);
        }
        Commands::Translate { message, lang } => {
            println!("{}", connect(&config.api)?.translate(&message, &lang).await?);
        }
        Commands::Health => {
            let health = connect(&config.api)?.health().await?;
            println!("{}: {}", health.status, health.message);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_does_not_need_a_backend() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("recommendations.txt");
        std::fs::write(&input, "1. 🌙 **Wind down**: Read before bed").unwrap();

        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        config.session.path = dir.path().join("session.json");

        let path = input.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["sleep-insights", "parse", path.as_str()]).unwrap();
        run(cli, config).await.unwrap();
    }

    #[tokio::test]
    async fn test_backend_commands_reject_bad_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();

        let cli = Cli::try_parse_from(["sleep-insights", "health"]).unwrap();
        let err = run(cli, config).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid URL"));
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("What is your age group? = 19–30").unwrap(),
            ("What is your age group?".to_string(), "19–30".to_string())
        );
        assert!(parse_answer("no separator").is_err());
    }
}
