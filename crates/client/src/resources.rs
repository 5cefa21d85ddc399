//! Panel bindings for the administrative resources.

use campusdesk_core::types::DbId;
use campusdesk_db::models::payment_method::{PaymentMethod, PaymentMethodInput};
use campusdesk_db::models::payment_plan::{PaymentPlan, PaymentPlanInput};
use campusdesk_db::models::refund::{Refund, RefundInput};
use campusdesk_db::models::student::{Student, StudentInput};
use campusdesk_db::models::student_payment::{StudentPayment, StudentPaymentInput};
use campusdesk_db::models::tuition_fee::{TuitionFee, TuitionFeeInput};

use crate::panel::PanelResource;

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

impl PanelResource for Student {
    type Form = StudentInput;

    const PATH: &'static str = "student";
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "Program", "Year level", "Date", "Email", "Contact"];

    fn id(&self) -> DbId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.program.clone(),
            self.year_level.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.email.clone(),
            self.contact.clone(),
        ]
    }

    fn to_form(&self) -> StudentInput {
        StudentInput {
            name: self.name.clone(),
            program: self.program.clone(),
            year_level: self.year_level.clone(),
            date: Some(self.date),
            email: self.email.clone(),
            contact: self.contact.clone(),
        }
    }
}

impl PanelResource for TuitionFee {
    type Form = TuitionFeeInput;

    const PATH: &'static str = "tuition-fee";
    const HEADERS: &'static [&'static str] = &["ID", "Type", "Amount"];

    fn id(&self) -> DbId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.fee_type.clone(), money(self.amount)]
    }

    fn to_form(&self) -> TuitionFeeInput {
        TuitionFeeInput {
            fee_type: self.fee_type.clone(),
            amount: Some(self.amount),
        }
    }
}

impl PanelResource for PaymentPlan {
    type Form = PaymentPlanInput;

    const PATH: &'static str = "payment-plan";
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Amount", "Schedule"];

    fn id(&self) -> DbId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            money(self.amount),
            self.schedule.clone(),
        ]
    }

    fn to_form(&self) -> PaymentPlanInput {
        PaymentPlanInput {
            name: self.name.clone(),
            amount: Some(self.amount),
            schedule: self.schedule.clone(),
        }
    }
}

impl PanelResource for Refund {
    type Form = RefundInput;

    const PATH: &'static str = "request-refund";
    const HEADERS: &'static [&'static str] =
        &["ID", "Payment", "Amount", "Description", "Status"];

    fn id(&self) -> DbId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.payment_id.clone(),
            money(self.amount),
            self.description.clone(),
            self.status.clone(),
        ]
    }

    /// The status is left out so saving the form keeps the stored one.
    fn to_form(&self) -> RefundInput {
        RefundInput {
            payment_id: self.payment_id.clone(),
            amount: Some(self.amount),
            description: self.description.clone(),
            status: None,
        }
    }
}

impl PanelResource for PaymentMethod {
    type Form = PaymentMethodInput;

    const PATH: &'static str = "payment-method";
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Image"];

    fn id(&self) -> DbId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.image.clone().unwrap_or_default(),
        ]
    }

    fn to_form(&self) -> PaymentMethodInput {
        PaymentMethodInput {
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

impl PanelResource for StudentPayment {
    type Form = StudentPaymentInput;

    const PATH: &'static str = "student-payment";
    const HEADERS: &'static [&'static str] =
        &["ID", "Student ID", "Student name", "Amount", "Description"];

    fn id(&self) -> DbId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.student_id.clone(),
            self.student_name.clone(),
            money(self.amount),
            self.description.clone(),
        ]
    }

    fn to_form(&self) -> StudentPaymentInput {
        StudentPaymentInput {
            student_id: self.student_id.clone(),
            student_name: self.student_name.clone(),
            amount: Some(self.amount),
            description: self.description.clone(),
        }
    }
}
