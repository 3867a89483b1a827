use std::env;
use tse_engine::config::ExpressionConfiguration;
use tse_engine::lexical::Tokenizer;
use tse_engine::tokens::Token;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    tse_engine::init()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <expression> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let mut expression: Option<&str> = None;
    let mut json_output = false;
    let mut arrays_allowed = true;

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => json_output = true,
            "--no-arrays" => arrays_allowed = false,
            other if other.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", other);
                std::process::exit(1);
            }
            other => {
                if expression.is_some() {
                    eprintln!("Error: Expected a single expression argument");
                    std::process::exit(1);
                }
                expression = Some(other);
            }
        }
    }

    let Some(expression) = expression else {
        eprintln!("Error: No expression given");
        std::process::exit(1);
    };

    let configuration = ExpressionConfiguration::builder()
        .arrays_allowed(arrays_allowed)
        .build();

    match Tokenizer::new(expression, &configuration).parse() {
        Ok(tokens) => {
            if json_output {
                print_tokens_json(&tokens);
            } else {
                print_tokens(&tokens);
            }
            Ok(())
        }
        Err(error) => {
            eprint!("{}", error.format_with_source(expression));
            std::process::exit(1);
        }
    }
}

fn print_tokens(tokens: &[Token]) {
    println!("{:>6}  {:<22}VALUE", "COLUMN", "TYPE");
    for token in tokens {
        println!(
            "{:>6}  {:<22}{}",
            token.start_column(),
            token.token_type().as_str(),
            token.value()
        );
    }
    println!();
    println!("{} token(s)", tokens.len());
}

fn print_tokens_json(tokens: &[Token]) {
    let records: Vec<serde_json::Value> = tokens
        .iter()
        .map(|token| {
            serde_json::json!({
                "start_column": token.start_column(),
                "type": token.token_type().as_str(),
                "value": token.value(),
                "has_definition": token.definition().is_some(),
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(records));
}

fn print_help(program_name: &str) {
    println!("Time-Series Expression Engine v{}", tse_engine::ENGINE_VERSION);
    println!("Tokenizes an expression and prints the resulting token list");
    println!();
    println!("USAGE:");
    println!("    {} <expression> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <expression>   The expression to tokenize (quote it in your shell)");
    println!();
    println!("OPTIONS:");
    println!("    --help         Show this help message");
    println!("    --json         Emit the token list as JSON");
    println!("    --no-arrays    Disable the [ ] array syntax");
    println!();
    println!("ENVIRONMENT:");
    println!("    TSE_LOG_LEVEL       error | warn | info | debug (default: info)");
    println!("    TSE_LOG_STRUCTURED  true for JSON-lines logging on stderr");
    println!();
    println!("EXAMPLES:");
    println!("    {} '1 + 2 * 3'", program_name);
    println!("    {} 'MA(prices, 30) > threshold' --json", program_name);
    println!("    {} 'SUM(1, 2, 3)' --no-arrays", program_name);
}
