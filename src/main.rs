fn main() -> anyhow::Result<()> {
    fake_news_lib::run()
}
