use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Serve requests read line by line from stdin until EOF.
pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Readability MCP server listening on stdio");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines
        .next_line()
        .await
        .wrap_err("Failed to read from stdin")?
    {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        log::debug!("MCP <- {message}");

        let Some(response) = super::handle_request(message, &global).await else {
            continue;
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');

        log::debug!("MCP -> {}", String::from_utf8_lossy(&payload).trim_end());

        stdout.write_all(&payload).await?;
        stdout.flush().await?;
    }

    if global.verbose {
        eprintln!("stdin closed, shutting down");
    }

    Ok(())
}
