use anyhow::Result;
use lpeg_binder::cli::run;

fn main() -> Result<()> {
    run()
}
