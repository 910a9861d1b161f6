use crate::applicant::{
    ConnectionType, CreditHistory, DeviceSignals, EducationLevel, EmploymentType,
    FinancialProfile, PersonalProfile,
};

use super::DocumentsPresent;

/// Debt-to-income ratio used when there is no income to divide by. Large enough that only
/// the bottom two rungs of the ladder can match.
pub(crate) const INCOME_SENTINEL_RATIO: f64 = 999.0;

/// (monthly net strictly above, debt ratio strictly below, score), checked top-down.
const NET_DEBT_LADDER: [(f64, f64, u8); 5] = [
    (2000.0, 0.20, 100),
    (1000.0, 0.35, 80),
    (500.0, 0.50, 60),
    (0.0, 0.70, 40),
    (0.0, f64::INFINITY, 25),
];
const NET_DEBT_FLOOR: u8 = 10;

const DEMOGRAPHICS_BASE: i32 = 50;
const DIGITAL_BASE: i32 = 50;

pub(crate) fn debt_to_income_ratio(financial: &FinancialProfile) -> f64 {
    if financial.monthly_income > 0.0 {
        financial.existing_debt / (financial.monthly_income * 12.0)
    } else {
        INCOME_SENTINEL_RATIO
    }
}

pub(crate) fn income_debt(financial: &FinancialProfile) -> u8 {
    let monthly_net = financial.monthly_income - financial.monthly_expenses;
    let ratio = debt_to_income_ratio(financial);

    NET_DEBT_LADDER
        .iter()
        .find(|(min_net, max_ratio, _)| monthly_net > *min_net && ratio < *max_ratio)
        .map(|(_, _, score)| *score)
        .unwrap_or(NET_DEBT_FLOOR)
}

pub(crate) fn employment(kind: EmploymentType) -> u8 {
    match kind {
        EmploymentType::FullTime => 100,
        EmploymentType::SelfEmployed => 80,
        EmploymentType::PartTime => 60,
        EmploymentType::Freelancer => 55,
        EmploymentType::Retired => 70,
        EmploymentType::Student => 35,
        EmploymentType::Unemployed => 15,
        EmploymentType::Other => 30,
    }
}

pub(crate) fn credit_history(history: CreditHistory) -> u8 {
    match history {
        CreditHistory::Excellent => 100,
        CreditHistory::Good => 80,
        CreditHistory::Fair => 55,
        CreditHistory::Poor => 25,
        CreditHistory::None | CreditHistory::Unknown => 40,
    }
}

pub(crate) fn demographics(personal: &PersonalProfile) -> u8 {
    let age_bonus = match personal.age {
        30..=55 => 20,
        25..=65 => 10,
        18..=24 => 0,
        _ => -5,
    };

    let education_bonus = match personal.education_level {
        EducationLevel::Doctorate => 30,
        EducationLevel::Master => 25,
        EducationLevel::Bachelor => 20,
        EducationLevel::Associate => 15,
        EducationLevel::HighSchool => 5,
        EducationLevel::Other => 10,
    };

    clamp_component(DEMOGRAPHICS_BASE + age_bonus + education_bonus)
}

pub(crate) fn digital_footprint(device: &DeviceSignals) -> u8 {
    let mut score = DIGITAL_BASE;

    if device.supports_modern_graphics {
        score += 10;
    }
    if device.supports_background_workers {
        score += 5;
    }
    if device.cpu_core_count.is_some_and(|cores| cores >= 4) {
        score += 10;
    }
    if device.device_memory_gb.is_some_and(|memory| memory >= 4) {
        score += 5;
    }

    score += match device.connection_type {
        ConnectionType::FourG => 15,
        ConnectionType::ThreeG => 8,
        ConnectionType::TwoG => 2,
        ConnectionType::Slow2G => 0,
        ConnectionType::Unknown => 5,
    };

    score += match device.screen_width {
        width if width >= 1920 => 5,
        width if width >= 1280 => 3,
        _ => 0,
    };

    clamp_component(score)
}

pub(crate) fn document_verification(documents: DocumentsPresent) -> u8 {
    match (documents.id, documents.income) {
        (true, true) => 100,
        (true, false) | (false, true) => 50,
        (false, false) => 0,
    }
}

fn clamp_component(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}
