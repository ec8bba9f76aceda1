use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(PackageId);
id_newtype!(OrderId);
id_newtype!(ContactId);
id_newtype!(UserId);

/// Wire value for a list sort parameter.
pub trait SortParam: Copy + Default + PartialEq + Send + Sync + 'static {
    fn as_param(self) -> &'static str;
}

/// Wire value for an optional list status filter.
pub trait FilterParam: Copy + PartialEq + Send + Sync + 'static {
    fn as_param(self) -> &'static str;
}

/// Filter placeholder for entities without a status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFilter {}

impl FilterParam for NoFilter {
    fn as_param(self) -> &'static str {
        match self {}
    }
}

/// Admin-side order lifecycle as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn label_id(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Menunggu",
            OrderStatus::Approved => "Disetujui",
            OrderStatus::Rejected => "Ditolak",
        }
    }
}

impl FilterParam for OrderStatus {
    fn as_param(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Rejected => "REJECTED",
        }
    }
}

/// Customer-facing projection of [`OrderStatus`] used by the status checker.
/// One lifecycle, two vocabularies: this mapping is the single place the
/// admin statuses are translated for customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderProgress {
    MenungguKonfirmasi,
    Dikonfirmasi,
    Dibatalkan,
}

impl OrderProgress {
    pub fn label_id(self) -> &'static str {
        match self {
            OrderProgress::MenungguKonfirmasi => "Menunggu Konfirmasi",
            OrderProgress::Dikonfirmasi => "Dikonfirmasi",
            OrderProgress::Dibatalkan => "Dibatalkan",
        }
    }

    /// Percentage for the two-step confirmation tracker.
    pub fn step_percent(self) -> u8 {
        match self {
            OrderProgress::MenungguKonfirmasi => 50,
            OrderProgress::Dikonfirmasi => 100,
            OrderProgress::Dibatalkan => 0,
        }
    }
}

impl From<OrderStatus> for OrderProgress {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => OrderProgress::MenungguKonfirmasi,
            OrderStatus::Approved => OrderProgress::Dikonfirmasi,
            OrderStatus::Rejected => OrderProgress::Dibatalkan,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    New,
    Read,
}

impl ContactStatus {
    pub fn label_id(self) -> &'static str {
        match self {
            ContactStatus::New => "Baru",
            ContactStatus::Read => "Dibaca",
        }
    }
}

impl FilterParam for ContactStatus {
    fn as_param(self) -> &'static str {
        match self {
            ContactStatus::New => "NEW",
            ContactStatus::Read => "READ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageSort {
    #[default]
    NameAsc,
    NameDesc,
    Cheapest,
    MostExpensive,
}

impl SortParam for PackageSort {
    fn as_param(self) -> &'static str {
        match self {
            PackageSort::NameAsc => "az",
            PackageSort::NameDesc => "za",
            PackageSort::Cheapest => "cheap",
            PackageSort::MostExpensive => "expensive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    Newest,
    Oldest,
    EventAsc,
    EventDesc,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortParam for OrderSort {
    fn as_param(self) -> &'static str {
        match self {
            OrderSort::Newest => "newest",
            OrderSort::Oldest => "oldest",
            OrderSort::EventAsc => "event_asc",
            OrderSort::EventDesc => "event_desc",
            OrderSort::PriceAsc => "price_asc",
            OrderSort::PriceDesc => "price_desc",
            OrderSort::NameAsc => "name_asc",
            OrderSort::NameDesc => "name_desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactSort {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    EmailAsc,
    EmailDesc,
}

impl SortParam for ContactSort {
    fn as_param(self) -> &'static str {
        match self {
            ContactSort::Newest => "newest",
            ContactSort::Oldest => "oldest",
            ContactSort::NameAsc => "name_asc",
            ContactSort::NameDesc => "name_desc",
            ContactSort::EmailAsc => "email_asc",
            ContactSort::EmailDesc => "email_desc",
        }
    }
}

/// Formats a rupiah amount the way the site displays prices, e.g.
/// `Rp 12.500.000`.
pub fn format_idr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_progress_projects_admin_lifecycle() {
        assert_eq!(
            OrderProgress::from(OrderStatus::Pending),
            OrderProgress::MenungguKonfirmasi
        );
        assert_eq!(
            OrderProgress::from(OrderStatus::Approved),
            OrderProgress::Dikonfirmasi
        );
        assert_eq!(
            OrderProgress::from(OrderStatus::Rejected),
            OrderProgress::Dibatalkan
        );
    }

    #[test]
    fn sort_params_use_backend_vocabulary() {
        assert_eq!(PackageSort::Cheapest.as_param(), "cheap");
        assert_eq!(OrderSort::EventDesc.as_param(), "event_desc");
        assert_eq!(ContactSort::EmailAsc.as_param(), "email_asc");
    }

    #[test]
    fn formats_idr_with_thousand_separators() {
        assert_eq!(format_idr(0), "Rp 0");
        assert_eq!(format_idr(950), "Rp 950");
        assert_eq!(format_idr(12_500_000), "Rp 12.500.000");
        assert_eq!(format_idr(-7_000), "-Rp 7.000");
    }
}
