use clap::Parser;
use integrations_imagegen::client::ImageGenConfig;
use integrations_imagegen::errors::{ErrorCode, ImageGenError, ImageGenResult};
use integrations_imagegen::observability::{init_logging, redact_secrets, LogConfig};
use integrations_imagegen::services::images::{
    format_for_display, ImageGenerationService, ImageModel, ImageOptions, ImageQuality,
    ImageResult, ImageSize, ImageStyle, ResponseFormat, SaveOptions, DEFAULT_SAVE_DIR,
};
use integrations_imagegen::ImageGenerationClientBuilder;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Generate an image from a text prompt with DALL-E.
#[derive(Parser, Debug)]
#[command(name = "imagegen", version, about, long_about = None)]
struct Cli {
    /// Text prompt describing the image to generate
    prompt: String,

    /// Model to use
    #[arg(long, default_value = "dall-e-3")]
    model: ImageModel,

    /// Image size: 1024x1024, 1792x1024, 1024x1792 (dall-e-3) or 256x256, 512x512, 1024x1024 (dall-e-2)
    #[arg(long, default_value = "1024x1024")]
    size: ImageSize,

    /// Image quality, dall-e-3 only: standard or hd
    #[arg(long)]
    quality: Option<ImageQuality>,

    /// Image style, dall-e-3 only: vivid or natural
    #[arg(long)]
    style: Option<ImageStyle>,

    /// Response format: url or b64_json
    #[arg(long = "format", default_value = "url")]
    response_format: ResponseFormat,

    /// Preset instead of individual settings: standard, high or fast
    #[arg(long, conflicts_with_all = ["model", "size", "quality", "style"])]
    tier: Option<String>,

    /// Save the image to this exact path
    #[arg(long, conflicts_with = "no_save")]
    save_path: Option<PathBuf>,

    /// Directory for automatically named images
    #[arg(long, default_value = DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,

    /// Don't download and save the image locally
    #[arg(long)]
    no_save: bool,

    /// Show technical details after the result
    #[arg(short, long)]
    verbose: bool,

    /// Provider API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

/// Rejects flag combinations the chosen model cannot honour.
fn validate_arguments(cli: &Cli) -> ImageGenResult<()> {
    if !cli.model.valid_sizes().contains(&cli.size) {
        let valid: Vec<&str> = cli.model.valid_sizes().iter().map(|s| s.as_str()).collect();
        return Err(ImageGenError::invalid_argument(format!(
            "Invalid size '{}' for {}. Valid sizes: {}",
            cli.size,
            cli.model,
            valid.join(", ")
        )));
    }

    if !cli.model.supports_quality_and_style() {
        if matches!(cli.quality, Some(q) if q != ImageQuality::Standard) {
            return Err(ImageGenError::invalid_argument(
                "Quality setting only supported for dall-e-3",
            ));
        }
        if matches!(cli.style, Some(s) if s != ImageStyle::Vivid) {
            return Err(ImageGenError::invalid_argument(
                "Style setting only supported for dall-e-3",
            ));
        }
    }

    Ok(())
}

fn build_options(cli: &Cli) -> ImageGenResult<ImageOptions> {
    if let Some(tier) = &cli.tier {
        let options = ImageGenerationService::create_options_for_quality(tier)?;
        return Ok(options.with_response_format(cli.response_format));
    }

    let mut options =
        ImageOptions::new(cli.model, cli.size).with_response_format(cli.response_format);
    if cli.model.supports_quality_and_style() {
        options = options
            .with_quality(cli.quality.unwrap_or(ImageQuality::Standard))
            .with_style(cli.style.unwrap_or(ImageStyle::Vivid));
    }
    Ok(options)
}

fn hint_for(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::ContentPolicyError => {
            Some("Try rephrasing your prompt to avoid potentially problematic content.")
        }
        ErrorCode::RateLimitError => {
            Some("Wait a moment and try again. Consider upgrading your OpenAI plan.")
        }
        ErrorCode::AuthenticationError => {
            Some("Check your API key. Visit https://platform.openai.com/api-keys")
        }
        _ => None,
    }
}

fn display_results(result: &ImageResult, verbose: bool) {
    println!("{}", format_for_display(result));

    if verbose {
        println!("\nTechnical Details:");
        println!("Generation ID: {}", result.generation_id);
        println!("Timestamp: {}", result.created_at.to_rfc3339());
        println!("Model: {}", result.metadata.model);
        println!("Size: {}", result.metadata.size);
        println!("Aspect ratio: {}", result.metadata.aspect_ratio());
        if let Some(quality) = result.metadata.quality {
            println!("Quality: {}", quality.as_str());
        }
        if let Some(style) = result.metadata.style {
            println!("Style: {}", style.as_str());
        }
        if let Some(size) = result.file_size() {
            println!("File size: {} bytes", size);
        }
    }

    match (&result.file_path, &result.image_url) {
        (Some(path), url) => {
            println!("\nImage saved to: {}", path.display());
            if let Some(url) = url {
                println!("You can also view it online: {}", url);
            }
        }
        (None, Some(url)) => {
            println!("\nImage available online (not saved locally):");
            println!("  Visit: {}", url);
            println!("  Note: URL expires in a few hours");
        }
        (None, None) => {}
    }
}

fn report(err: &ImageGenError) {
    let message = redact_secrets(&err.to_string());
    match err {
        ImageGenError::Image(image_error) => {
            eprintln!("\nImage generation error: {}", message);
            if let Some(hint) = hint_for(image_error.code) {
                eprintln!("Hint: {}", hint);
            }
        }
        ImageGenError::InvalidArgument { .. } => {
            eprintln!("\nInvalid input: {}", message);
            eprintln!("Use --help to see valid options.");
        }
        ImageGenError::Configuration { .. } => {
            eprintln!("\nConfiguration error: {}", message);
        }
    }
}

async fn run(cli: Cli) -> ImageGenResult<()> {
    validate_arguments(&cli)?;
    let options = build_options(&cli)?;

    let config = ImageGenConfig::resolve(cli.api_key.clone())?;
    let service = ImageGenerationClientBuilder::new()
        .with_config(config)
        .build_service()?;

    if cli.verbose {
        println!("Generating image with {} ({})", options.model, options.size);
        println!("Prompt: {}", cli.prompt);
        match (&cli.save_path, cli.no_save) {
            (Some(path), _) => println!("Custom save path: {}", path.display()),
            (None, false) => println!("Auto-save: {}", cli.save_dir.display()),
            (None, true) => println!("Save: disabled"),
        }
        println!();
    }

    info!(model = %options.model, size = %options.size, "starting image generation");
    let result = match &cli.save_path {
        Some(path) => {
            service
                .generate_and_save(&cli.prompt, path, Some(options))
                .await?
        }
        None => {
            let save = if cli.no_save {
                SaveOptions::disabled()
            } else {
                SaveOptions::in_dir(&cli.save_dir)
            };
            service.generate_image(&cli.prompt, Some(options), &save).await?
        }
    };
    info!(generation_id = %result.generation_id, "image generation completed");

    display_results(&result, cli.verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %redact_secrets(&err.to_string()), code = ?err.code(), "image generation failed");
            report(&err);
            ExitCode::FAILURE
        }
    }
}
