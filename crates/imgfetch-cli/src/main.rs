use imgfetch_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_fetch, run_serve};
use imgfetch_lib::error::ImgFetchError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), ImgFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Serve(params) => run_serve(params).await?,
        ResolvedCommand::Fetch(params) => {
            run_fetch(params).await?;
        }
    }

    Ok(())
}
