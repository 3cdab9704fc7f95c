//! Prompts used on first run, when no config file exists yet.

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};

const MEDIA_URL_PROMPT: &[u8] =
    b"Please enter the media upload URL (https://api.cloudinary.com/v1_1/<cloud>/image/upload): \n";

/// Asks for the media host upload endpoint on stdin and returns the trimmed answer.
///
/// # Example
/// ```no_run
/// use sports_admin::config::user_prompts::prompt_for_media_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let upload_url = prompt_for_media_url().await?;
/// println!("Uploads go to {}", upload_url);
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_media_url() -> Result<String, AppError> {
    let mut stdout = io::stdout();
    stdout.write_all(MEDIA_URL_PROMPT).await?;
    stdout.flush().await?;

    let mut input = String::new();
    let mut reader = io::BufReader::new(io::stdin());
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}
