// Prompts for the outreach features. The model is asked to answer in Japanese
// because the reporters, themes and messages it works with are Japanese.

use crate::models::{Article, Reporter, Theme};

pub const ANALYZE_SYSTEM_ROLE: &str =
    "あなたは経験豊富な広報専門家です。記者の分析と効果的なコミュニケーション戦略の立案を行います。";

pub const PITCH_SYSTEM_ROLE: &str =
    "あなたは優秀な広報担当者です。記者に対する効果的な企画提案メールを作成します。";

pub const MATCH_SYSTEM_ROLE: &str =
    "あなたは広報戦略のエキスパートです。文書内容を分析し、最適な記者をマッチングします。";

/// Characters of document text included in the matching prompt.
pub const MATCH_TEXT_LIMIT: usize = 2000;
/// Article titles listed per reporter in the matching prompt.
pub const MATCH_ARTICLES_PER_REPORTER: usize = 3;
/// Article titles included when analysing a single reporter.
pub const ANALYZE_ARTICLE_LIMIT: usize = 10;

const NONE: &str = "なし";
const UNKNOWN: &str = "不明";

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn article_titles(articles: &[Article], limit: usize) -> Vec<String> {
    articles.iter().take(limit).map(|a| a.title.clone()).collect()
}

/// Cuts `text` to `limit` characters, marking the cut with "...".
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub fn build_analyze_prompt(reporter: &Reporter, articles: &[Article]) -> String {
    format!(
        r#"記者の情報を分析して、以下の観点から詳細な分析を行ってください：

記者情報：
- 名前: {name}
- 会社: {company}
- 職位: {position}
- 過去の記事: {articles}
- 既知の興味分野: {interests}

分析内容：
1. 主要な興味・関心分野
2. 記事の傾向とパターン
3. 専門領域の深さ
4. 効果的なアプローチ方法
5. 最適な連絡タイミング

JSON形式で以下の構造で回答してください：
{{
  "interests": ["分野1", "分野2", "分野3"],
  "expertise_level": "beginner|intermediate|expert",
  "preferred_content_type": "news|analysis|interview|feature",
  "communication_style": "formal|casual|technical|narrative",
  "best_contact_time": "morning|afternoon|evening",
  "recommended_approach": "具体的なアプローチ方法",
  "confidence_score": 0
}}"#,
        name = reporter.name,
        company = reporter.company,
        position = reporter.position.as_deref().unwrap_or(UNKNOWN),
        articles = join_or(&article_titles(articles, ANALYZE_ARTICLE_LIMIT), NONE),
        interests = join_or(&reporter.interests, NONE),
    )
}

pub struct PitchPromptInput<'a> {
    pub reporter: &'a Reporter,
    pub theme: Option<&'a Theme>,
    pub tone: &'a str,
    pub purpose: &'a str,
    pub communication_style: Option<&'a str>,
    pub additional_context: Option<&'a str>,
}

pub fn build_pitch_prompt(input: &PitchPromptInput<'_>) -> String {
    let theme_block = match input.theme {
        Some(theme) => format!(
            "企画情報：\n- テーマ: {}\n- 説明: {}\n- キーワード: {}",
            theme.title,
            theme.description,
            join_or(&theme.keywords, NONE)
        ),
        None => "企画情報：\n- テーマ: 指定なし（目的と補足情報から内容を組み立ててください）"
            .to_string(),
    };
    let context_block = input
        .additional_context
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("\n\n補足情報：\n{c}"))
        .unwrap_or_default();

    format!(
        r#"以下の情報を基に、効果的な企画提案メールを作成してください：

記者情報：
- 名前: {name}
- 会社: {company}
- 興味分野: {interests}
- コミュニケーションスタイル: {style}

{theme_block}

目的: {purpose}
トーン: {tone}{context_block}

要件：
1. 件名を含む完全なメール形式
2. 記者の関心に合わせたカスタマイズ
3. 具体的な価値提案
4. 次のアクションが明確
5. 適切な敬語と丁寧語

JSON形式で以下の構造で回答してください：
{{
  "subject": "件名",
  "body": "メール本文",
  "key_points": ["重要ポイント1", "重要ポイント2"],
  "call_to_action": "具体的な次のアクション",
  "estimated_response_probability": 0
}}"#,
        name = input.reporter.name,
        company = input.reporter.company,
        interests = join_or(&input.reporter.interests, UNKNOWN),
        style = input.communication_style.unwrap_or(UNKNOWN),
        purpose = input.purpose,
        tone = input.tone,
    )
}

pub fn build_match_prompt(text: &str, reporters: &[(Reporter, Vec<Article>)]) -> String {
    let reporter_list: String = reporters
        .iter()
        .enumerate()
        .map(|(i, (r, articles))| {
            format!(
                "\n{}. {} ({})\n   - reporter_id: {}\n   - 興味分野: {}\n   - 過去記事: {}\n",
                i + 1,
                r.name,
                r.company,
                r.id,
                join_or(&r.interests, NONE),
                join_or(&article_titles(articles, MATCH_ARTICLES_PER_REPORTER), NONE),
            )
        })
        .collect();

    format!(
        r#"以下の文書内容を分析し、最も適切な記者を推薦してください：

文書内容：
{document}

記者リスト：
{reporter_list}
分析要件：
1. 文書の主要トピックとキーワード抽出
2. 各記者との関連性スコア（0-100）
3. マッチング理由の詳細説明
4. 推奨アプローチ方法

reporter_id には記者リストに記載された値をそのまま使用してください。

JSON形式で以下の構造で回答してください：
{{
  "document_summary": "文書の要約",
  "main_topics": ["トピック1", "トピック2"],
  "keywords": ["キーワード1", "キーワード2"],
  "matches": [
    {{
      "reporter_id": "記者ID",
      "reporter_name": "記者名",
      "score": 0,
      "reasons": ["理由1", "理由2"],
      "suggested_approach": "推奨アプローチ",
      "confidence": "low|medium|high"
    }}
  ]
}}"#,
        document = truncate_chars(text, MATCH_TEXT_LIMIT),
    )
}
