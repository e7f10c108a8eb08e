use std::sync::Arc;

use gram::{Api, FileStorage, SessionStore, Storage};

/// Walks the whole client surface once: restore or open a session, read
/// the feed, publish a post, like it, comment on it, follow an author,
/// and search. With no reachable API server every call lands on the
/// fallback path; point GRAM_API_URL at a real server to go remote.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let session_file = std::env::temp_dir().join("gram_session.json");
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&session_file)?);

    let mut api = Api::new(storage.clone())?;
    let mut session = SessionStore::new(storage);

    if session.state().is_authenticated {
        println!("restored session from {}", session_file.display());
    } else {
        session
            .authenticate(&api, "john@example.com", "password123")
            .await;
    }

    if let Some(err) = &session.state().error {
        eprintln!("login failed: {}", err);
        return Ok(());
    }
    let Some(me) = session.state().user.clone() else {
        eprintln!("no session after login");
        return Ok(());
    };
    println!(
        "logged in as {} ({} followers / {} following)",
        me.username, me.follower_count, me.following_count
    );

    let feed = api.list_posts().await?;
    println!("\nfeed ({} posts):", feed.len());
    for post in &feed {
        println!(
            "  [{}] {} — {} ({} likes, {} comments)",
            post.id,
            post.user.username,
            post.caption,
            post.like_count,
            post.comments.len()
        );
    }

    let post = api
        .create_post(&me.id, "https://picsum.photos/id/660/600/600", "Hello from the demo!")
        .await?;
    println!("\npublished post {} at {}", post.id, post.created_at);

    api.like_post(&me.id, &post.id).await?;
    let comment = api.add_comment(&me.id, &post.id, "First!").await?;
    println!("commented as {}: {}", comment.user.username, comment.content);

    api.follow(&me.id, "3").await?;
    let alex = api.get_user("alex_smith").await?;
    println!(
        "\n{} now has {} followers (following: {:?})",
        alex.username, alex.follower_count, alex.is_following
    );

    let results = api.search_users("doe").await?;
    println!(
        "search \"doe\": {:?}",
        results.iter().map(|u| u.username.as_str()).collect::<Vec<_>>()
    );

    Ok(())
}
