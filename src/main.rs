use std::process;

use parsemath::{
    application::{
        error::AppError,
        render::{BatchRenderer, FallbackStyle, KatexOptions, KatexRenderer},
    },
    config,
    infra::{
        io::{Sink, Source},
        telemetry,
    },
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let messages = error.messages();

    if dispatcher::has_been_set() {
        error!(error = %error, causes = ?messages, "parsemath failed");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, causes = ?messages, "parsemath failed");
    });
}

fn run() -> Result<(), AppError> {
    let settings = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let source = Source::from_path(settings.io.input.as_deref());
    let sink = Sink::from_path(settings.io.output.as_deref());

    debug!(
        target = "parsemath::main",
        source = ?source,
        sink = ?sink,
        output = %settings.render.output,
        trust = settings.render.trust,
        macros = settings.render.macros.len(),
        "Starting batch"
    );

    let request = source.read_request()?;

    let renderer = KatexRenderer::new(KatexOptions::from(&settings.render));
    let batch = BatchRenderer::new(
        renderer,
        FallbackStyle::new(settings.render.error_color.clone()),
    );
    let results = batch.render_batch(&request);

    sink.write_results(&results, settings.io.pretty)?;
    Ok(())
}
