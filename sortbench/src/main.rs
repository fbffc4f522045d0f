fn main() -> anyhow::Result<()> {
    sortbench::run()
}
