mod helpers;

use almanac::knowledge::query::answer;
use almanac::knowledge::seed::default_articles;
use helpers::FakeGenerator;

#[tokio::test]
async fn answer_wraps_question_with_article_context() {
    let generator = FakeGenerator::answering("Within 30 days.");
    let policy = &default_articles()[1];

    let reply = answer(&generator, "How long do I have to return?", &policy.content)
        .await
        .unwrap();

    assert_eq!(reply, "Within 30 days.");
    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("full refunds within 30 days"));
    assert!(prompts[0].contains("How long do I have to return?"));
}

#[tokio::test]
async fn blank_context_uses_placeholder() {
    let generator = FakeGenerator::answering("I couldn't find relevant information.");

    answer(&generator, "What is the meaning of life?", "  ").await.unwrap();

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("No specific information was found in the knowledge base."));
}
