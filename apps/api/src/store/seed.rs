//! Demo data for the in-memory store: the reporters, articles, contact log,
//! themes and events PR staff see on a fresh install.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{
    Article, ContactHistory, ContactOutcome, ContactPreference, ContactType, Event,
    EventParticipant, EventStatus, EventType, ExposureStatus, Priority, Reporter, Theme,
};

pub struct SeedData {
    pub reporters: Vec<Reporter>,
    pub articles: Vec<Article>,
    pub contacts: Vec<ContactHistory>,
    pub themes: Vec<Theme>,
    pub events: Vec<Event>,
    pub participants: Vec<EventParticipant>,
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("seed dates are valid calendar days")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SeedData {
    pub fn build() -> Self {
        let tanaka = Reporter {
            id: Uuid::new_v4(),
            name: "田中 太郎".to_string(),
            company: "日本経済新聞".to_string(),
            email: "tanaka@nikkei.com".to_string(),
            phone: Some("03-1234-5678".to_string()),
            position: Some("経済部記者".to_string()),
            interests: strings(&["フィンテック", "スタートアップ", "DX"]),
            specialties: strings(&["金融", "経済政策", "企業分析"]),
            contact_preference: ContactPreference::Email,
            notes: Some("AI関連の記事を多く執筆。返信は早い。".to_string()),
            created_at: day(2024, 1, 15),
            updated_at: day(2024, 12, 1),
        };
        let sato = Reporter {
            id: Uuid::new_v4(),
            name: "佐藤 花子".to_string(),
            company: "TechCrunch Japan".to_string(),
            email: "sato@techcrunch.jp".to_string(),
            phone: Some("03-9876-5432".to_string()),
            position: Some("シニアライター".to_string()),
            interests: strings(&["AI", "SaaS", "IoT"]),
            specialties: strings(&["テクノロジー", "スタートアップ", "プロダクト分析"]),
            contact_preference: ContactPreference::Both,
            notes: Some("テック系に詳しい。デモや実機があると食いつきが良い。".to_string()),
            created_at: day(2024, 2, 20),
            updated_at: day(2024, 11, 15),
        };
        let yamada = Reporter {
            id: Uuid::new_v4(),
            name: "山田 次郎".to_string(),
            company: "朝日新聞".to_string(),
            email: "yamada@asahi.com".to_string(),
            phone: Some("03-5555-1111".to_string()),
            position: Some("科学部記者".to_string()),
            interests: strings(&["環境技術", "バイオテック", "データサイエンス"]),
            specialties: strings(&["科学技術", "環境問題", "研究開発"]),
            contact_preference: ContactPreference::Email,
            notes: Some("学術的な裏付けを重視。研究者との関係が深い。".to_string()),
            created_at: day(2024, 3, 10),
            updated_at: day(2024, 10, 30),
        };

        let articles = vec![
            Article {
                id: Uuid::new_v4(),
                reporter_id: tanaka.id,
                title: "国内フィンテック企業の資金調達額が過去最高を記録".to_string(),
                content: Some("2024年上半期、国内のフィンテック企業による資金調達総額が...".to_string()),
                url: Some("https://nikkei.com/article/fintech-funding-2024".to_string()),
                published_at: day(2024, 7, 1),
                tags: strings(&["フィンテック", "資金調達", "投資"]),
                summary: Some("フィンテック企業の資金調達動向について分析".to_string()),
                created_at: day(2024, 7, 1),
            },
            Article {
                id: Uuid::new_v4(),
                reporter_id: sato.id,
                title: "生成AIを活用した新しいSaaSプロダクトが続々登場".to_string(),
                content: Some("生成AIの技術進歩により、従来にない革新的なSaaSプロダクトが...".to_string()),
                url: Some("https://techcrunch.jp/2024/06/generative-ai-saas".to_string()),
                published_at: day(2024, 6, 15),
                tags: strings(&["AI", "SaaS", "プロダクト"]),
                summary: Some("生成AIを活用したSaaSプロダクトの最新トレンド".to_string()),
                created_at: day(2024, 6, 15),
            },
            Article {
                id: Uuid::new_v4(),
                reporter_id: yamada.id,
                title: "カーボンニュートラル実現に向けた新技術の開発状況".to_string(),
                content: Some("2030年のカーボンニュートラル実現に向けて、各社が...".to_string()),
                url: Some("https://asahi.com/science/carbon-neutral-tech".to_string()),
                published_at: day(2024, 5, 20),
                tags: strings(&["環境技術", "カーボンニュートラル", "技術開発"]),
                summary: Some("カーボンニュートラル実現に向けた技術開発の現状".to_string()),
                created_at: day(2024, 5, 20),
            },
        ];

        let contacts = vec![
            ContactHistory {
                id: Uuid::new_v4(),
                reporter_id: tanaka.id,
                date: day(2024, 6, 1),
                contact_type: ContactType::Email,
                subject: "新フィンテックサービス「PayFast」のご紹介".to_string(),
                content: "この度、弊社では新しいフィンテックサービス「PayFast」をリリースいたします...".to_string(),
                outcome: ContactOutcome::Interested,
                next_action_date: Some(day(2024, 6, 15)),
                created_at: day(2024, 6, 1),
            },
            ContactHistory {
                id: Uuid::new_v4(),
                reporter_id: sato.id,
                date: day(2024, 5, 15),
                contact_type: ContactType::Meeting,
                subject: "AIチャットボットサービスの取材について".to_string(),
                content: "弊社のAIチャットボットサービスについてデモンストレーションを実施...".to_string(),
                outcome: ContactOutcome::Successful,
                next_action_date: None,
                created_at: day(2024, 5, 15),
            },
            ContactHistory {
                id: Uuid::new_v4(),
                reporter_id: yamada.id,
                date: day(2024, 4, 20),
                contact_type: ContactType::Email,
                subject: "環境配慮型IoTセンサーの開発について".to_string(),
                content: "弊社で開発中の環境配慮型IoTセンサーについて...".to_string(),
                outcome: ContactOutcome::FollowUpNeeded,
                next_action_date: Some(day(2024, 5, 1)),
                created_at: day(2024, 4, 20),
            },
        ];

        let themes = vec![
            Theme {
                id: Uuid::new_v4(),
                title: "AI活用による業務効率化".to_string(),
                description: "生成AIを活用した企業の業務効率化事例とその効果について".to_string(),
                keywords: strings(&["AI", "業務効率化", "DX", "生産性向上"]),
                category: Some("テクノロジー".to_string()),
                priority: Priority::High,
                source_url: None,
                upload_id: None,
                created_at: day(2024, 1, 1),
                updated_at: day(2024, 6, 1),
            },
            Theme {
                id: Uuid::new_v4(),
                title: "スタートアップの資金調達動向".to_string(),
                description: "2024年のスタートアップ企業の資金調達動向と投資家の関心分野".to_string(),
                keywords: strings(&["スタートアップ", "投資", "VC", "資金調達"]),
                category: Some("ビジネス".to_string()),
                priority: Priority::Medium,
                source_url: None,
                upload_id: None,
                created_at: day(2024, 2, 1),
                updated_at: day(2024, 5, 1),
            },
            Theme {
                id: Uuid::new_v4(),
                title: "サステナビリティ経営".to_string(),
                description: "企業のサステナビリティ経営への取り組みと成果".to_string(),
                keywords: strings(&["サステナビリティ", "ESG", "環境経営", "CSR"]),
                category: Some("環境・社会".to_string()),
                priority: Priority::High,
                source_url: None,
                upload_id: None,
                created_at: day(2024, 3, 1),
                updated_at: day(2024, 4, 1),
            },
        ];

        let summit = Event {
            id: Uuid::new_v4(),
            title: "AI & Tech Summit 2024".to_string(),
            description: "最新のAI技術とその実用化事例を紹介する大規模カンファレンス".to_string(),
            event_date: day(2024, 8, 15),
            location: Some("東京ビッグサイト".to_string()),
            tags: strings(&["AI", "テクノロジー", "カンファレンス"]),
            status: EventStatus::Completed,
            event_type: EventType::Conference,
            created_at: day(2024, 6, 1),
            updated_at: day(2024, 8, 20),
        };
        let fintech = Event {
            id: Uuid::new_v4(),
            title: "フィンテック業界勉強会".to_string(),
            description: "金融業界の最新トレンドとフィンテック企業の事例紹介".to_string(),
            event_date: day(2024, 9, 10),
            location: Some("オンライン".to_string()),
            tags: strings(&["フィンテック", "金融", "勉強会"]),
            status: EventStatus::Completed,
            event_type: EventType::Seminar,
            created_at: day(2024, 7, 1),
            updated_at: day(2024, 9, 15),
        };
        let sustainability = Event {
            id: Uuid::new_v4(),
            title: "サステナビリティ経営セミナー".to_string(),
            description: "企業のサステナビリティ経営への取り組み事例".to_string(),
            event_date: day(2024, 10, 5),
            location: Some("大阪国際会議場".to_string()),
            tags: strings(&["サステナビリティ", "経営", "セミナー"]),
            status: EventStatus::Planned,
            event_type: EventType::Seminar,
            created_at: day(2024, 8, 1),
            updated_at: day(2024, 8, 1),
        };

        let participants = vec![
            EventParticipant {
                id: Uuid::new_v4(),
                event_id: summit.id,
                reporter_id: tanaka.id,
                exposure_status: ExposureStatus::Published,
                article_url: Some("https://nikkei.com/ai-summit-2024".to_string()),
                notes: Some("AI技術の最新動向について詳細な記事を執筆".to_string()),
                created_at: day(2024, 8, 16),
            },
            EventParticipant {
                id: Uuid::new_v4(),
                event_id: summit.id,
                reporter_id: sato.id,
                exposure_status: ExposureStatus::Published,
                article_url: Some("https://techcrunch.jp/ai-summit-report".to_string()),
                notes: Some("スタートアップ企業のAI活用事例を中心にレポート".to_string()),
                created_at: day(2024, 8, 16),
            },
            EventParticipant {
                id: Uuid::new_v4(),
                event_id: fintech.id,
                reporter_id: tanaka.id,
                exposure_status: ExposureStatus::Published,
                article_url: Some("https://nikkei.com/fintech-study-session".to_string()),
                notes: Some("フィンテック業界の最新トレンドについて分析記事を掲載".to_string()),
                created_at: day(2024, 9, 11),
            },
            EventParticipant {
                id: Uuid::new_v4(),
                event_id: sustainability.id,
                reporter_id: yamada.id,
                exposure_status: ExposureStatus::Pending,
                article_url: None,
                notes: Some("サステナビリティ経営の記事執筆予定".to_string()),
                created_at: day(2024, 10, 6),
            },
        ];

        SeedData {
            reporters: vec![tanaka, sato, yamada],
            articles,
            contacts,
            themes,
            events: vec![summit, fintech, sustainability],
            participants,
        }
    }
}
