use clap::{Parser, Subcommand};
use spellvox_consensus::{select_best, Alternative};
use spellvox_phonetics::{extract_letters_fallback, interpret_letters, map_token};

#[derive(Parser)]
#[command(name = "spell-probe")]
#[command(version = "1.0")]
#[command(about = "SpellVox phonetic mapping diagnostic tool")]
#[command(
    long_about = "One-shot checks for the phonetic dictionary, fallback heuristics, and consensus selection, without running the full pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a transcript through the phonetic dictionary
    Interpret {
        /// Transcript text, e.g. "bee for bravo"
        text: String,
    },
    /// Run consensus selection over a set of alternatives
    Select {
        /// Alternatives as TEXT or TEXT:CONFIDENCE, e.g. "bee:0.92"
        alternatives: Vec<String>,

        /// Resolve as spelled letters instead of free text
        #[arg(short, long)]
        alphabet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Interpret { ref text } => run_interpret(&cli, text),
        Commands::Select {
            ref alternatives,
            alphabet,
        } => run_select(&cli, alternatives, alphabet),
    }
}

fn run_interpret(cli: &Cli, text: &str) -> anyhow::Result<()> {
    if cli.verbose {
        for token in text.split_whitespace() {
            match map_token(token) {
                Some(letter) => println!("  {} -> {}", token, letter),
                None => println!("  {} -> (no mapping)", token),
            }
        }
        println!();
    }

    let letters = interpret_letters(text);
    println!("Interpreted: {}", display_or_empty(&letters));
    if letters.is_empty() {
        let fallback = extract_letters_fallback(text);
        println!("Fallback:    {}", display_or_empty(&fallback));
    }

    Ok(())
}

fn run_select(cli: &Cli, raw: &[String], alphabet: bool) -> anyhow::Result<()> {
    if raw.is_empty() {
        anyhow::bail!("no alternatives given");
    }

    let alternatives: Vec<Alternative> = raw.iter().map(|s| parse_alternative(s)).collect();

    if cli.verbose {
        for alt in &alternatives {
            println!("  {:<30} conf={:.2}", alt.text, alt.confidence);
        }
        println!();
    }

    let selection = select_best(&alternatives, alphabet);
    println!("Selected:   {}", display_or_empty(&selection.text));
    println!("Raw:        {}", display_or_empty(&selection.raw));
    println!("Confidence: {:.2}", selection.confidence);

    Ok(())
}

/// Splits on the last colon so texts containing colons still parse; anything
/// without a trailing number is taken as bare text with zero confidence.
fn parse_alternative(s: &str) -> Alternative {
    if let Some((text, conf)) = s.rsplit_once(':') {
        if let Ok(confidence) = conf.parse::<f32>() {
            return Alternative::new(text, confidence);
        }
    }
    Alternative::new(s, 0.0)
}

fn display_or_empty(s: &str) -> &str {
    if s.is_empty() {
        "(empty)"
    } else {
        s
    }
}
