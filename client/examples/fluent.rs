//! Fluent query walkthrough against a JSON REST API.
//!
//! Run with: `cargo run -p restorm-client --example fluent`
//! (expects a jsonplaceholder-style API at the configured base URL)

use restorm_client::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Post {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<ModelId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

impl Model for Post {
    fn resource() -> &'static str {
        "posts"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<ModelId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl Model for Comment {
    fn resource() -> &'static str {
        "comments"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}

#[tokio::main]
async fn main() -> RestResult<()> {
    let client = HttpClient::configure(
        ClientOptions::new("https://jsonplaceholder.typicode.com")
            .cache(CacheOptions::default()),
    )?;

    let posts = Post::query(&client)
        .where_(json!({ "userId": 1 }))
        .order_by("title", Direction::Asc)
        .limit(5)
        .all()
        .await?;
    println!("{} posts for user 1", posts.len());

    let comments = Post::entry(&client, 1)
        .has_many::<Comment>("comments")
        .all()
        .await?;
    println!("post 1 has {} comments", comments.len());

    if let Some(first) = Post::query(&client).first().await? {
        println!("first post: {}", first.title);
    }

    Ok(())
}
