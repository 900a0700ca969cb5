//! # seed
//!
//! Fills an empty forum snapshot with a handful of demo debates so a view
//! layer has something to render. An existing snapshot is never touched.

use anyhow::Context;
use configs::{LogSettings, Settings};
use rf_core::{CommentDraft, Forum, PostDraft, Topic};
use rf_store_local::LocalBlobStore;
use tracing_subscriber::EnvFilter;

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn post(author: &str, title: &str, content: &str, topics: &[Topic]) -> PostDraft {
    PostDraft {
        author: author.to_string(),
        title: Some(title.to_string()),
        content: content.to_string(),
        topics: topics.to_vec(),
        image: None,
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);

    let store = LocalBlobStore::new(&settings.storage.data_dir);
    let mut forum = Forum::open(store, settings.forum.clone()).context("opening forum snapshot")?;

    if !forum.posts().is_empty() {
        tracing::info!(posts = forum.posts().len(), "snapshot already populated, nothing to seed");
        return Ok(());
    }

    let energy = forum.create_post(post(
        "Ana",
        "¿Debería la ciudad pasarse a energía solar?",
        "Los paneles son cada vez más baratos. ¿Qué frena la adopción?",
        &[Topic::Environment, Topic::Economy],
    ))?;
    let schools = forum.create_post(post(
        "Leo",
        "Programación en la escuela primaria",
        "¿A qué edad tiene sentido empezar?",
        &[Topic::Education, Topic::Technology],
    ))?;
    forum.create_post(post(
        "Mia",
        "El mejor partido de la temporada",
        "Sin spoilers en el título, discutamos aquí.",
        &[Topic::Sports],
    ))?;

    forum.adjust_post_score(&energy, 3)?;
    forum.adjust_post_score(&schools, 1)?;

    let first = forum.add_comment(&energy, None, CommentDraft::new("Leo", "El coste inicial sigue siendo alto."))?;
    let reply = forum.add_comment(&energy, Some(&first), CommentDraft::new("Mia", "Hay subvenciones."))?;
    forum.adjust_comment_score(&energy, &reply, 2, Some(&first))?;
    forum.add_comment(&schools, None, CommentDraft::new("Ana", "Con juegos, desde los seis."))?;

    // every mutation already wrote a snapshot; this only retries a failed one
    forum.flush().context("writing seeded snapshot")?;

    tracing::info!(
        posts = forum.posts().len(),
        dir = %forum.store().root().display(),
        "demo snapshot written"
    );
    Ok(())
}
