use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::{debug, error};

use askrouter::{AskConfig, Error, PromptClient};

const FAILURE_MESSAGE: &str
  = "Failed to get a response from the model.";

#[tokio::main]
async fn main() -> ExitCode
{   // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("error")
    ).init();

    let client = match build_client(|name| std::env::var(name).ok())
    {   Ok(client) => client
      , Err(e) => {
          error!("{}", e);
          eprintln!("{}", e);
          return ExitCode::from(2);
        }
    };

    let prompt = match read_prompt()
    {   Ok(prompt) => prompt
      , Err(e) => {
          eprintln!("Failed to read prompt: {}", e);
          return ExitCode::FAILURE;
        }
    };
    debug!("Read {} byte prompt", prompt.len());

    match client.ask(&prompt).await
    {   Ok(reply) if !reply.is_empty() => {
          println!("\nModel response:\n {}", reply);
          ExitCode::SUCCESS
        }
      , _ => {
          println!("{}", FAILURE_MESSAGE);
          ExitCode::FAILURE
        }
    }
}

/// Configuration and client construction, the two startup failure points
fn build_client<F>(lookup: F) -> Result<PromptClient, Error>
where F: Fn(&str) -> Option<String>
{   AskConfig::from_lookup(lookup).and_then(PromptClient::new)
}

/// One line from stdin, minus its line terminator
fn read_prompt() -> io::Result<String>
{   print!("Enter your prompt: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(strip_line_ending(line))
}

fn strip_line_ending(mut line: String) -> String
{   if line.ends_with('\n')
    {   line.pop();
        if line.ends_with('\r')
        {   line.pop();
        }
    }
    line
}
