/// Well-known dictionary rows.
///
/// Payments are typed with `Principal` or `Interest`; plans target
/// `LendingPlan` or `PaymentPlan`. Any other dictionary id has no reporting
/// meaning and is skipped by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Principal,
    Interest,
    LendingPlan,
    PaymentPlan,
}

impl Category {
    pub fn id(self) -> i32 {
        match self {
            Category::Principal => 1,
            Category::Interest => 2,
            Category::LendingPlan => 3,
            Category::PaymentPlan => 4,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Category::Principal),
            2 => Some(Category::Interest),
            3 => Some(Category::LendingPlan),
            4 => Some(Category::PaymentPlan),
            _ => None,
        }
    }
}
