fn main() -> anyhow::Result<()> {
    zonecov_lib::run()
}
