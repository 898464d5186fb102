use std::io::Write;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use airproyect::config::{parse_timeout_secs, DEFAULT_BASE_URL};
use airproyect::screen::ResultCard;
use airproyect::{ClientConfig, Field, Language, PredictionClient, PredictionScreen, Submission};

/// Air-quality prediction from PM10, PM2.5, NO2 and O3 readings.
///
/// With four readings on the command line, predicts once and exits (status 1
/// on any failure). Without them, prompts for the readings interactively.
#[derive(Parser, Debug)]
#[command(name = "airproyect", version)]
struct Cli {
    /// Base URL of the prediction service
    #[arg(long, env = "AIRPROYECT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Transport timeout in seconds
    #[arg(
        long = "timeout-secs",
        env = "AIRPROYECT_TIMEOUT_SECS",
        default_value = "10",
        value_parser = parse_timeout_secs
    )]
    timeout: Duration,

    /// Display language, "es" or "en"
    #[arg(long, env = "AIRPROYECT_LANG", default_value = "es", value_parser = Language::from_str)]
    lang: Language,

    #[arg(num_args = 4, allow_negative_numbers = true, value_names = ["PM10", "PM2_5", "NO2", "O3"])]
    readings: Vec<String>,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::new(&self.base_url)?
            .with_timeout(self.timeout)
            .with_language(self.lang))
    }
}

/// Presses Predict and waits for the screen to settle. Returns whether a
/// classification came back.
async fn run_prediction(screen: &PredictionScreen) -> Result<bool> {
    match screen.submit() {
        Submission::Dispatched(handle) => {
            handle.await.context("prediction task failed")?;
        }
        Submission::Rejected(_) | Submission::Ignored => {}
    }
    Ok(!screen.state().recommendation.is_empty())
}

fn print_card(card: &ResultCard, language: Language) {
    println!();
    println!("[{}] {}", card.rendered_at.format("%H:%M:%S"), card.headline);
    if let Some(recommendation) = &card.recommendation {
        let title = match language {
            Language::Es => "💡 Recomendación Personalizada",
            Language::En => "💡 Recommendation",
        };
        println!("{title}");
        println!("   {recommendation}");
    }
    println!();
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush().context("failed to flush stdout")
}

async fn interactive(screen: &PredictionScreen) -> Result<()> {
    let language = screen.language();
    let (ask, menu) = match language {
        Language::Es => (
            "Ingresa",
            "[Enter] predecir de nuevo · r = reiniciar · q = salir: ",
        ),
        Language::En => ("Enter", "[Enter] predict again · r = reset · q = quit: "),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        for field in Field::ALL {
            let current = screen.state().form.get(field).to_string();
            prompt(&format!("{ask} {field} (µg/m³) [{current}]: "))?;
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            match line.trim() {
                "q" => return Ok(()),
                "" => {}
                value => screen.set_field(field, value),
            }
        }

        run_prediction(screen).await?;
        print_card(&screen.card(), language);

        prompt(menu)?;
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        match line.trim() {
            "q" => return Ok(()),
            "r" => screen.reset(),
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();
    let config = cli.client_config()?;
    let client = PredictionClient::new(&config)?;
    info!(
        "Prediction endpoint: {} (timeout {:?}, lang {})",
        client.endpoint(),
        config.timeout(),
        config.language()
    );

    let screen = PredictionScreen::new(client);
    if cli.readings.is_empty() {
        interactive(&screen).await?;
        return Ok(ExitCode::SUCCESS);
    }

    for (field, value) in Field::ALL.into_iter().zip(&cli.readings) {
        screen.set_field(field, value.as_str());
    }
    let classified = run_prediction(&screen).await?;
    print_card(&screen.card(), screen.language());
    Ok(if classified {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
