//! Referral progress math and the static reward catalogue.

#[cfg(test)]
#[path = "referral_test.rs"]
mod referral_test;

/// Successful referrals needed to unlock the next reward.
pub const NEXT_REWARD_TARGET: u32 = 3;
pub const NEXT_REWARD_LABEL: &str = "Smartwatch (₹5,000)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferralProgress {
    pub successful: u32,
    pub needed: u32,
    /// Width of the progress bar, 0..=100.
    pub percent: u32,
}

impl ReferralProgress {
    /// Progress derived from the student count the backend reports.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_count(student_count: f64) -> Self {
        let successful = if student_count.is_finite() && student_count > 0.0 {
            student_count.floor().min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        let needed = NEXT_REWARD_TARGET.saturating_sub(successful);
        let denominator = f64::from(successful) + f64::from(needed.max(1));
        let percent = ((f64::from(successful) / denominator) * 100.0).round().min(100.0) as u32;
        Self { successful, needed, percent }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardTier {
    pub title: &'static str,
    pub headline: &'static str,
    pub note: &'static str,
    /// Rendered across the full row.
    pub featured: bool,
}

pub const REWARD_TIERS: &[RewardTier] = &[
    RewardTier {
        title: "Mega Contest • Just 300 Referral = Contest Eligibility",
        headline: "Audi Car!",
        note: "📅 Winner Announcement: 21st August 2025",
        featured: true,
    },
    RewardTier { title: "Smartwatch", headline: "3 Referrals", note: "Worth ₹5,000", featured: false },
    RewardTier { title: "65\" Sony Bravia", headline: "50 Referrals", note: "Premium Quality", featured: false },
    RewardTier { title: "Mac Book", headline: "15 Referrals", note: "Latest Model", featured: false },
    RewardTier { title: "iPhone 16", headline: "30 Referrals", note: "Ultimate Reward!", featured: false },
];
