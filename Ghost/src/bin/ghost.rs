fn main() -> anyhow::Result<()> {
    ghost::cli::run_cli()
}
