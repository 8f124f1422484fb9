//! Command-line front end for HyperColl.
//!
//! Reads a dataset and an optional configuration file, renders the diagram
//! and writes it as SVG.

mod args;
mod config;
mod dataset;
mod error;

pub use args::{Args, TextMode};
pub use config::{AppConfig, PageConfig, load_config};
pub use dataset::{Collection, Dataset};
pub use error::CliError;

use log::info;

use hypercoll::{
    HyperColl,
    config::RenderOptions,
    draw::{Canvas, CosmicTextEngine, HeuristicTextEngine, TextEngine},
};

/// Renders the dataset named by `args.input` to `args.output`.
///
/// # Errors
///
/// Returns a [`CliError`] when the configuration or dataset cannot be loaded
/// or the diagram cannot be rendered or written.
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input, output_path = args.output; "Processing dataset");

    let app_config = load_config(args.config.as_ref())?;
    let page = app_config.page();
    page.validate()?;

    let dataset = Dataset::load(&args.input)?;
    let options = dataset.render().unwrap_or(app_config.render());

    match args.text {
        TextMode::Fonts => draw(&dataset, options, canvas(args, page, CosmicTextEngine::new()))?,
        TextMode::Heuristic => draw(&dataset, options, canvas(args, page, HeuristicTextEngine))?,
    }

    info!(output_path = args.output; "Diagram written");
    Ok(())
}

fn canvas<T: TextEngine>(args: &Args, page: PageConfig, engine: T) -> Canvas<T> {
    Canvas::new(page.width, page.height, engine).with_output(&args.output)
}

fn draw<T: TextEngine>(
    dataset: &Dataset,
    options: &RenderOptions,
    canvas: Canvas<T>,
) -> Result<(), CliError> {
    let (width, height) = (canvas.width(), canvas.height());
    let mut diagram = HyperColl::new(dataset.labels(), canvas, width, height)?;

    let inner_radius = diagram.render(dataset.collections(), options)?;
    info!(inner_radius, collections = dataset.collections().len(); "Collections rendered");

    for ring in dataset.rings() {
        let sectors = diagram.sectors(ring)?;
        info!(
            inner_radius = ring.inner_radius(),
            outer_radius = ring.outer_radius(),
            sectors = sectors.len();
            "Sector ring rendered"
        );
    }

    diagram.finish()?;
    Ok(())
}
