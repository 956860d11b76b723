//! Basic logger usage example
//!
//! Demonstrates fields, both output formats, copies and configuration.
//!
//! Run with: cargo run --example basic_usage

use fieldlog::prelude::*;

fn main() -> Result<()> {
    println!("=== fieldlog - Basic Usage Example ===\n");

    // Text lines on stdout
    let mut logger = Logger::with_sink(Sink::stdout());

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message (the process keeps running)");

    println!("\n2. Attaching fields:");
    logger.put_fields(fields! {
        "service" => "billing",
        "version" => 3,
    });
    let port = 8080;
    info!(logger, "listening on port {}", port);

    println!("\n3. A copy with extra fields and JSON output:");
    let mut request_logger = logger.copy();
    request_logger
        .put_fields(logger.fields().with("request_id", "b7f3c2"))
        .apply_settings([("formatter", "json"), ("report_caller", "true")]);
    info!(request_logger, "request handled in {}ms", 12);
    logger.info("the original logger is unchanged");

    println!("\n4. Configuration loaded from JSON:");
    let config = LoggerConfig::from_json(r#"{"min_level": "warn", "timestamp_format": "unix_millis"}"#)?;
    logger.set_config(&config);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
