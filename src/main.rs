use std::env;
use std::io::{self, BufWriter, Read};
use std::process::ExitCode;

use tracing::{error, info_span};

use cgit_filters::app::controllers::source_filter;
use cgit_filters::app::infrastructure::logging;
use cgit_filters::app::services::theme::Stylesheets;
use cgit_filters::{FilterSettings, RepoContext, Result, SyntaxRegistry};

/// cgit source-filter: `syntax-highlighting <filename>`, file on stdin,
/// highlighted HTML on stdout.
fn main() -> ExitCode {
    logging::init();
    let repo = RepoContext::from_env();
    let _span = info_span!("source_filter", repo = repo.label()).entered();

    let filename = env::args_os()
        .nth(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();

    match filter(&filename) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(filename, error = %e, "Source filter failed");
            ExitCode::FAILURE
        }
    }
}

fn filter(filename: &str) -> Result<()> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;

    let settings = FilterSettings::load();
    let registry = SyntaxRegistry::new();
    let stylesheets = Stylesheets::new(&settings);

    let mut out = BufWriter::new(io::stdout().lock());
    source_filter::run(filename, &input, &settings, &registry, &stylesheets, &mut out)?;
    Ok(())
}
