use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use fractal::application::{
    BuildOptions, BuildUseCase, PublishUseCase, WatchEvent, WatchOptions, WatchUseCase,
};
use fractal::infrastructure::{EsbuildBundler, RegistryClient};

use crate::ui::context::UiContext;

/// `fractal build` arguments after parsing
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub watch: bool,
    pub registry: Option<String>,
    pub jobs: Option<usize>,
}

pub fn cmd_build(args: BuildArgs, ui: UiContext) -> Result<()> {
    let config = super::load_config(&args.input, &ui)?;

    let mut options = BuildOptions::from_config(&args.input, &config);
    if let Some(output) = &args.output {
        options = options.with_output(output);
    }
    if let Some(jobs) = args.jobs {
        options = options.with_jobs(jobs);
    }

    let bundler = Arc::new(EsbuildBundler::new(config.bundler.esbuild.clone()));
    let use_case = BuildUseCase::new(bundler);

    if args.watch {
        if args.registry.is_some() {
            tracing::warn!("--registry is ignored in watch mode; run `fractal publish` to upload");
        }
        return run_watch(use_case, options, ui);
    }

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::build::render_build_header(
                &options.input,
                &options.output,
                args.registry.as_deref(),
                options.jobs,
                ui.color,
                ui.unicode,
            )
        );
    }

    let events = super::event_sink(&ui);
    let report = use_case.build_with_events(&options, events.clone())?;
    if !ui.json {
        print!(
            "{}",
            crate::ui::views::build::render_build_summary(&report, ui.color, ui.unicode)
        );
    }

    let mut publish_failures = 0;
    if let Some(registry) = &args.registry {
        let metadata: Vec<PathBuf> = report.built.iter().map(|b| b.metadata.clone()).collect();
        let publisher = PublishUseCase::new(Arc::new(RegistryClient::new(registry.as_str())));
        let published = publisher.publish_artifacts(&metadata, events);
        if !ui.json {
            print!(
                "{}",
                crate::ui::views::publish::render_publish_summary(&published, ui.color, ui.unicode)
            );
        }
        publish_failures = published.failed.len();
    }

    if !report.is_success() {
        bail!(
            "{} of {} fractal sources failed to build",
            report.failed.len(),
            report.total()
        );
    }
    if publish_failures > 0 {
        bail!("{publish_failures} artifacts failed to publish");
    }
    Ok(())
}

fn run_watch(use_case: BuildUseCase, options: BuildOptions, ui: UiContext) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })?;

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::watch::render_watch_header(
                &options.input.display().to_string(),
                &options.output.display().to_string(),
                ui.color,
                ui.unicode,
            )
        );
    }

    let watch = WatchUseCase::new(use_case, WatchOptions::new(options).with_json(ui.json));
    watch.start(running, |event| print_watch_event(&event, &ui))?;
    Ok(())
}

fn print_watch_event(event: &WatchEvent, ui: &UiContext) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered =
        crate::ui::views::watch::render_watch_event(&timestamp, event, ui.color, ui.unicode);
    match event {
        WatchEvent::Error { .. } | WatchEvent::ItemFailed { .. } => eprint!("{rendered}"),
        _ => print!("{rendered}"),
    }
}

