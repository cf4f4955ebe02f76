use domain::{Category, FieldUpdate, Notification, StoredComment};
use serde_json::Value;

const BASE_URL: &str = "http://127.0.0.1:3000";
const SENDER: &str = "ferris@example.com";
const RECEIVER: &str = "writer@example.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    println!("Starting comment form test client...");

    println!("\n[1/3] Filling in the draft...");
    let fields = [
        FieldUpdate::AuthorName("Ferris".to_string()),
        FieldUpdate::AuthorEmail(SENDER.to_string()),
        FieldUpdate::RecipientEmail(RECEIVER.to_string()),
        FieldUpdate::Category(Category::Issue),
        FieldUpdate::Message("This is a message from the comment form test client!".to_string()),
    ];
    let fields_url = format!("{}/api/form/fields", BASE_URL);
    for field in &fields {
        client.put(&fields_url).json(field).send().await?.error_for_status()?;
    }
    let snapshot: Value = client
        .get(format!("{}/api/form", BASE_URL))
        .send()
        .await?
        .json()
        .await?;
    println!("   -> Draft: {}", snapshot["draft"]);

    println!("\n[2/3] Submitting...");
    let submit_url = format!("{}/api/form/submit", BASE_URL);
    let resp = client
        .post(&submit_url)
        .query(&[("sender", SENDER), ("receiver", RECEIVER)])
        .send()
        .await?;
    let status = resp.status();
    let notification: Notification = resp.json().await?;
    if status.is_success() {
        println!("   -> ✅ {}", notification.message);
    } else {
        println!("   -> ❌ {} ({})", notification.message, status);
        return Ok(());
    }

    println!("\n[3/3] Fetching locally cached comments...");
    let list_url = format!("{}/api/comments", BASE_URL);
    let comments: Vec<StoredComment> = client.get(&list_url).send().await?.json().await?;

    println!("   -> {} cached comment(s):", comments.len());
    for c in comments {
        println!(
            "      - [{}] #{} {} ({}): {}",
            c.record.created_at, c.id, c.record.name_commenter, c.record.category, c.record.comment
        );
    }

    Ok(())
}
