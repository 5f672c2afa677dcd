//! Built-in seed dataset.
//!
//! Used when neither a persisted snapshot nor the remote service provides
//! data, and restored on logout.

use chrono::NaiveDate;

use crate::entity::{
    Addon, AgendaItem, AgendaStatus, Equipment, EquipmentStatus, EscalaItem, Instructor,
    PaymentStatus, Room, Student, StudentStatus, SubscriptionPlan, Transaction, TransactionKind,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn student(id: &str, name: &str, phone: &str, plan: &str, schedule: &[&str]) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: format!("{}@example.com", id),
        birth_date: None,
        status: StudentStatus::Active,
        plan: plan.to_string(),
        plan_expires_on: Some(date(2025, 12, 31)),
        instructor_id: Some("i1".to_string()),
        schedule: schedule.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn students() -> Vec<Student> {
    let mut inactive = student("s3", "Carla Mendes", "+55 11 97777-3333", "1x", &[]);
    inactive.status = StudentStatus::Inactive;
    inactive.instructor_id = Some("i2".to_string());

    vec![
        student(
            "s1",
            "Ana Souza",
            "+55 11 99999-1111",
            "2x",
            &["Seg 08:00", "Qua 08:00"],
        ),
        student("s2", "Bruno Lima", "+55 11 98888-2222", "3x", &["Ter 18:00"]),
        inactive,
    ]
}

pub fn instructors() -> Vec<Instructor> {
    vec![
        Instructor {
            id: "i1".to_string(),
            name: "Juliana Prado".to_string(),
            phone: "+55 11 96666-4444".to_string(),
            email: "juliana@example.com".to_string(),
            specialties: vec!["Pilates Solo".to_string(), "Reformer".to_string()],
            commission: None,
        },
        Instructor {
            id: "i2".to_string(),
            name: "Marcos Teixeira".to_string(),
            phone: "+55 11 95555-5555".to_string(),
            email: "marcos@example.com".to_string(),
            specialties: vec!["Funcional".to_string()],
            commission: Some(35.0),
        },
    ]
}

pub fn rooms() -> Vec<Room> {
    vec![
        Room {
            id: "r1".to_string(),
            name: "Sala 1".to_string(),
            capacity: 4,
        },
        Room {
            id: "r2".to_string(),
            name: "Sala 2".to_string(),
            capacity: 6,
        },
    ]
}

pub fn equipments() -> Vec<Equipment> {
    vec![
        Equipment {
            id: "e1".to_string(),
            name: "Reformer".to_string(),
            room_id: Some("r1".to_string()),
            quantity: 4,
            status: EquipmentStatus::Available,
        },
        Equipment {
            id: "e2".to_string(),
            name: "Cadillac".to_string(),
            room_id: Some("r2".to_string()),
            quantity: 1,
            status: EquipmentStatus::Maintenance,
        },
    ]
}

pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "t1".to_string(),
            description: "Mensalidade Ana Souza".to_string(),
            amount: 250.0,
            kind: TransactionKind::Income,
            date: date(2025, 1, 5),
            status: PaymentStatus::Paid,
            student_id: Some("s1".to_string()),
            category: Some("Mensalidade".to_string()),
        },
        Transaction {
            id: "t2".to_string(),
            description: "Mensalidade Bruno Lima".to_string(),
            amount: 320.0,
            kind: TransactionKind::Income,
            date: date(2025, 1, 10),
            status: PaymentStatus::Pending,
            student_id: Some("s2".to_string()),
            category: Some("Mensalidade".to_string()),
        },
        Transaction {
            id: "t3".to_string(),
            description: "Aluguel".to_string(),
            amount: 1800.0,
            kind: TransactionKind::Expense,
            date: date(2025, 1, 1),
            status: PaymentStatus::Paid,
            student_id: None,
            category: Some("Infraestrutura".to_string()),
        },
    ]
}

pub fn agenda() -> Vec<AgendaItem> {
    vec![
        AgendaItem {
            id: "a1".to_string(),
            student_id: "s1".to_string(),
            instructor_id: Some("i1".to_string()),
            room_id: Some("r1".to_string()),
            date: date(2025, 1, 13),
            time: "08:00".to_string(),
            status: AgendaStatus::Scheduled,
        },
        AgendaItem {
            id: "a2".to_string(),
            student_id: "s2".to_string(),
            instructor_id: Some("i1".to_string()),
            room_id: Some("r2".to_string()),
            date: date(2025, 1, 14),
            time: "18:00".to_string(),
            status: AgendaStatus::Scheduled,
        },
    ]
}

pub fn escala() -> Vec<EscalaItem> {
    vec![
        EscalaItem {
            id: "es1".to_string(),
            instructor_id: "i1".to_string(),
            day_of_week: 1,
            start_time: "07:00".to_string(),
            end_time: "12:00".to_string(),
            room_id: Some("r1".to_string()),
        },
        EscalaItem {
            id: "es2".to_string(),
            instructor_id: "i2".to_string(),
            day_of_week: 2,
            start_time: "17:00".to_string(),
            end_time: "21:00".to_string(),
            room_id: Some("r2".to_string()),
        },
    ]
}

pub fn subscription_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan {
            id: "plan_basic".to_string(),
            name: "Básico".to_string(),
            price: 89.9,
            max_students: Some(50),
            features: vec!["Agenda".to_string(), "Alunos".to_string()],
        },
        SubscriptionPlan {
            id: "plan_pro".to_string(),
            name: "Profissional".to_string(),
            price: 149.9,
            max_students: None,
            features: vec![
                "Agenda".to_string(),
                "Alunos".to_string(),
                "Relatórios".to_string(),
            ],
        },
    ]
}

pub fn addons() -> Vec<Addon> {
    vec![
        Addon {
            id: "addon_financial".to_string(),
            key: "financialModule".to_string(),
            name: "Módulo Financeiro".to_string(),
            description: "Controle de receitas, despesas e comissões".to_string(),
            price: 39.9,
        },
        Addon {
            id: "addon_whatsapp".to_string(),
            key: "whatsappBot".to_string(),
            name: "Chatbot WhatsApp".to_string(),
            description: "Lembretes e mensagens automáticas".to_string(),
            price: 49.9,
        },
    ]
}
