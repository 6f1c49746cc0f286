// src/cli/generate.rs - One-shot generation command

use std::io::Read;
use std::sync::Arc;

use super::render;
use super::GenerateArgs;
use crate::backend::HttpBackend;
use crate::generation::GenerationManager;
use crate::session::SessionState;

fn read_prompt(args: &GenerateArgs) -> anyhow::Result<String> {
    if args.stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(args.prompt.join(" "))
}

pub async fn run_generate(
    backend: Arc<HttpBackend>,
    session: SessionState,
    args: GenerateArgs,
) -> anyhow::Result<()> {
    let prompt = read_prompt(&args)?;
    let token = session.token().map(str::to_string);

    let mut generator = GenerationManager::new(backend.clone(), session);
    let draft = generator.draft_mut();
    draft.set_prompt(&prompt);
    draft.resolution = args.resolution;
    draft.duration = args.duration;

    eprintln!("Generating… ({})", render::draft_summary(generator.draft()));
    let entry = generator.generate().await?;

    println!("Video id: {}", entry.id);
    for line in render::entry_lines(&entry) {
        println!("{line}");
    }

    if let (Some(path), Some(url)) = (args.download.as_deref(), entry.stream_url.as_deref()) {
        let bytes = backend.download(url, token.as_deref(), path).await?;
        println!("Saved {} ({} bytes)", path.display(), bytes);
    }
    Ok(())
}
