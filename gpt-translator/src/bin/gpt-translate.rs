use clap::Parser;
use gpt_translator::language::{self, LANGUAGES};
use gpt_translator::{
    ClientConfig, CompletionProvider, MockMode, MockProvider, OpenAiProvider, SystemClipboard,
    TranslationState, TranslatorSession,
};
use tracing_subscriber::EnvFilter;

/// Translate text with a chat-completion model
#[derive(Debug, Parser)]
#[command(name = "gpt-translate", version, about)]
struct Args {
    /// Text to translate
    #[arg(required_unless_present = "list_languages")]
    text: Option<String>,

    /// Source language code, or "auto" to let the model detect it
    #[arg(short, long, default_value = "auto")]
    from: String,

    /// Target language code
    #[arg(short, long, default_value = "en")]
    to: String,

    /// Use the mock provider instead of the network
    #[arg(short, long)]
    mock: bool,

    /// Copy the translation to the system clipboard
    #[arg(short, long)]
    copy: bool,

    /// Show the prompt and provider details
    #[arg(short, long)]
    verbose: bool,

    /// Print supported languages and exit
    #[arg(short, long)]
    list_languages: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" })),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.list_languages {
        for language in LANGUAGES {
            let note = if language.is_auto() { " (source only)" } else { "" };
            println!("{:<6} {}{}", language.code, language.name, note);
        }
        return Ok(());
    }

    let mut session = TranslatorSession::new();
    session.set_source(&args.from)?;
    session.set_target(&args.to)?;
    session.set_input(args.text.unwrap_or_default());

    let provider: Box<dyn CompletionProvider> = if args.mock {
        Box::new(MockProvider::new(MockMode::Echo))
    } else {
        Box::new(OpenAiProvider::new(ClientConfig::from_env()?)?)
    };

    if args.verbose {
        let source = language::source_language(&args.from)?;
        let target = language::target_language(&args.to)?;
        eprintln!("Provider: {}", provider.provider_name());
        eprintln!("{} → {}", source.name, target.name);
        eprintln!();
    }

    session.translate(provider.as_ref()).await?;

    match session.state() {
        TranslationState::Succeeded(text) => {
            println!("{}", text);
            if args.copy {
                let notice = session.copy_output(&SystemClipboard)?;
                eprintln!("{}", notice);
            }
            Ok(())
        }
        _ => {
            eprintln!("{}", session.display_text());
            std::process::exit(1);
        }
    }
}
