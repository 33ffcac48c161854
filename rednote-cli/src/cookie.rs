use crate::args::CookieSubcommand;

/// Hide the value of a `key=value` segment, keeping only its length
fn mask(segment: &str) -> String {
    match segment.split_once('=') {
        Some((key, value)) => format!("{key}=<{} chars>", value.chars().count()),
        None => format!("<{} chars>", segment.chars().count()),
    }
}

pub fn handle(cmd: CookieSubcommand, cookie: &str) -> miette::Result<()> {
    match cmd {
        CookieSubcommand::Inspect => {
            let segments = rednote_signer::cookie::normalise(cookie);
            if segments.is_empty() {
                miette::bail!(
                    help = "copy the `Cookie` header of a logged-in browser session into REDNOTE_COOKIE",
                    "No cookie segments found"
                );
            }

            for segment in segments {
                println!("{}", mask(segment));
            }
        }
    }

    Ok(())
}
