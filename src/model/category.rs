use serde::{Deserialize, Serialize};

/// The data categories found in a Swarmic export, in the order they are processed.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SleepSessions,
    CaloriesEntries,
    ExerciseSessions,
    BodyweightEntries,
    Transactions,
    NetWorthDaily,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

/// Static export settings for one category.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CategoryConfig {
    /// Name of the CSV file written for the category.
    pub filename: &'static str,
    /// Fields holding dates or timestamps that get a `<field>_readable` companion column.
    pub date_fields: &'static [&'static str],
    /// Human readable description used in the summary report.
    pub description: &'static str,
}

const SLEEP_SESSIONS: CategoryConfig = CategoryConfig {
    filename: "sleep_sessions.csv",
    date_fields: &[
        "session_date",
        "sleep_time",
        "wake_time",
        "created_at",
        "updated_at",
    ],
    description: "Sleep tracking sessions with bedtime and wake times",
};

const CALORIES_ENTRIES: CategoryConfig = CategoryConfig {
    filename: "calories_entries.csv",
    date_fields: &["log_date", "logged_at", "created_at"],
    description: "Calorie intake log entries",
};

const EXERCISE_SESSIONS: CategoryConfig = CategoryConfig {
    filename: "exercise_sessions.csv",
    date_fields: &[
        "session_date",
        "start_time",
        "end_time",
        "created_at",
        "updated_at",
    ],
    description: "Exercise sessions with duration and calories burned",
};

const BODYWEIGHT_ENTRIES: CategoryConfig = CategoryConfig {
    filename: "bodyweight_entries.csv",
    date_fields: &["log_date", "logged_at", "created_at", "updated_at"],
    description: "Body weight and body mass percentage measurements",
};

const TRANSACTIONS: CategoryConfig = CategoryConfig {
    filename: "finance_transactions.csv",
    date_fields: &["transaction_date", "created_at", "updated_at"],
    description: "Financial transactions (income and expenses)",
};

const NET_WORTH_DAILY: CategoryConfig = CategoryConfig {
    filename: "net_worth_daily.csv",
    date_fields: &["snapshot_date", "created_at"],
    description: "Daily net worth snapshots",
};

impl Category {
    /// Every category, in processing order.
    pub const ALL: [Category; 6] = [
        Category::SleepSessions,
        Category::CaloriesEntries,
        Category::ExerciseSessions,
        Category::BodyweightEntries,
        Category::Transactions,
        Category::NetWorthDaily,
    ];

    /// The key under which the category appears in the export's `data` object.
    pub fn key(&self) -> &'static str {
        match self {
            Category::SleepSessions => "sleep_sessions",
            Category::CaloriesEntries => "calories_entries",
            Category::ExerciseSessions => "exercise_sessions",
            Category::BodyweightEntries => "bodyweight_entries",
            Category::Transactions => "transactions",
            Category::NetWorthDaily => "net_worth_daily",
        }
    }

    pub fn config(&self) -> &'static CategoryConfig {
        match self {
            Category::SleepSessions => &SLEEP_SESSIONS,
            Category::CaloriesEntries => &CALORIES_ENTRIES,
            Category::ExerciseSessions => &EXERCISE_SESSIONS,
            Category::BodyweightEntries => &BODYWEIGHT_ENTRIES,
            Category::Transactions => &TRANSACTIONS,
            Category::NetWorthDaily => &NET_WORTH_DAILY,
        }
    }

    pub fn filename(&self) -> &'static str {
        self.config().filename
    }

    pub fn date_fields(&self) -> &'static [&'static str] {
        self.config().date_fields
    }

    pub fn description(&self) -> &'static str {
        self.config().description
    }
}
