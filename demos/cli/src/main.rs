use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use timeline_collection::{parse_collection_str, CollectionClient, ReqwestTransport};
use timeline_core::settings::{
    ATTR_CACHE, ATTR_COLLECTION, ATTR_CONTENT, ATTR_DATE, ATTR_DATE_FORMAT, ATTR_FILTER,
    ATTR_MEDIA, ATTR_REVERSE, ATTR_TITLE_FORMAT,
};
use timeline_core::{render_timeline, FormatContext, HostConfig};

#[derive(Parser, Debug)]
#[command(
    name = "timeline-cli",
    about = "Render markup timeline từ một collection (URL hoặc file JSON)."
)]
struct Args {
    /// URL collection, ví dụ https://example.com/blog.
    #[arg(short, long, required_unless_present = "input")]
    collection: Option<String>,
    /// Đọc payload JSON từ file thay vì tải qua mạng.
    #[arg(short, long, conflicts_with = "collection")]
    input: Option<PathBuf>,
    /// Bộ lọc dạng `tag:<giá trị>` hoặc `category:<giá trị>`.
    #[arg(long)]
    filter: Option<String>,
    /// Cho phép dùng response đã cache (mặc định luôn tải mới).
    #[arg(long)]
    cache: bool,
    #[arg(long)]
    media: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    title_format: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    date_format: Option<String>,
    #[arg(long)]
    reverse: bool,
    /// Độ lệch múi giờ so với UTC, tính bằng phút.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    utc_offset_minutes: i32,
}

impl Args {
    /// Các thuộc tính `data-*` tương đương trên host element.
    fn attributes(&self) -> BTreeMap<String, String> {
        let flag = |set: bool| set.then(|| "true".to_string());
        [
            (ATTR_COLLECTION, self.collection.clone()),
            (ATTR_FILTER, self.filter.clone()),
            (ATTR_CACHE, flag(self.cache)),
            (ATTR_MEDIA, self.media.clone()),
            (ATTR_DATE, self.date.clone()),
            (ATTR_TITLE_FORMAT, self.title_format.clone()),
            (ATTR_CONTENT, self.content.clone()),
            (ATTR_DATE_FORMAT, self.date_format.clone()),
            (ATTR_REVERSE, flag(self.reverse)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = HostConfig::resolve(&args.attributes());
    log::debug!("resolved settings: {config:?}");

    let collection = match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            parse_collection_str(&data)?
        }
        None => {
            let client = CollectionClient::new(ReqwestTransport::new());
            match client
                .fetch(&config.collection_url, config.filter.as_ref(), config.cache)
                .await
            {
                Ok(collection) => collection,
                Err(diagnostic) => bail!("{diagnostic}"),
            }
        }
    };

    let context = FormatContext::from_offset_minutes(args.utc_offset_minutes);
    let (html, count) = render_timeline(&collection.items, &config, &context);
    log::info!("rendered {count} event(s)");
    println!("{html}");

    Ok(())
}
