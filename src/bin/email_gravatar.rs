use std::env;
use std::io::{self, BufWriter, Read};
use std::process::ExitCode;

use tracing::{error, info_span};

use cgit_filters::app::controllers::email_filter;
use cgit_filters::app::infrastructure::logging;
use cgit_filters::{FilterSettings, RepoContext, Result};

/// cgit email-filter: `email-gravatar <email> [page]`, text on stdin,
/// avatar-prefixed text on stdout.
fn main() -> ExitCode {
    logging::init();
    let repo = RepoContext::from_env();
    let _span = info_span!("email_filter", repo = repo.label()).entered();

    let mut args = env::args_os().skip(1).map(|arg| arg.to_string_lossy().into_owned());
    let email = args.next().unwrap_or_default();
    let page = args.next();

    match filter(&email, page.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Email filter failed");
            ExitCode::FAILURE
        }
    }
}

fn filter(email: &str, page: Option<&str>) -> Result<()> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;

    let settings = FilterSettings::load();
    let mut out = BufWriter::new(io::stdout().lock());
    email_filter::run(email, page, &input, &settings, &mut out)
}
