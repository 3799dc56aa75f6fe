//! Navigation composed from the current session

use crate::auth::session::SessionContext;

/// A workshop section page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub slug: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
}

/// Sections every signed-in user can reach
pub const SECTIONS: &[Section] = &[
    Section {
        slug: "dashboard",
        title: "Dashboard",
        blurb: "Active projects, pending quotes and stock at a glance",
    },
    Section {
        slug: "projects",
        title: "Projects",
        blurb: "Fabrication jobs and their progress",
    },
    Section {
        slug: "orders",
        title: "Orders",
        blurb: "Customer orders and confirmations",
    },
    Section {
        slug: "quotes",
        title: "Quotes",
        blurb: "Quotes awaiting approval",
    },
    Section {
        slug: "inventory",
        title: "Inventory",
        blurb: "Steel stock, hardware and consumables",
    },
    Section {
        slug: "employees",
        title: "Employees",
        blurb: "Workshop staff",
    },
    Section {
        slug: "clients",
        title: "Clients",
        blurb: "Customer accounts",
    },
    Section {
        slug: "finances",
        title: "Finances",
        blurb: "Income and expenses",
    },
    Section {
        slug: "customer-statements",
        title: "Customer Statements",
        blurb: "Balances per client",
    },
    Section {
        slug: "performance",
        title: "Performance",
        blurb: "Throughput and delivery metrics",
    },
    Section {
        slug: "my-tasks",
        title: "My Tasks",
        blurb: "Work assigned to you",
    },
];

pub fn find_section(slug: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.slug == slug)
}

/// One link in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub admin_only: bool,
}

pub const MANAGE_USERS_HREF: &str = "/admin/users";

/// Links to render for this session. No profile means no links at all.
pub fn compose(ctx: &SessionContext) -> Vec<NavItem> {
    let Some(user) = ctx.user.as_ref() else {
        return Vec::new();
    };

    let mut items: Vec<NavItem> = SECTIONS
        .iter()
        .map(|s| NavItem {
            label: s.title.to_string(),
            href: format!("/{}", s.slug),
            admin_only: false,
        })
        .collect();

    if user.is_admin() {
        items.push(NavItem {
            label: "Manage Users".to_string(),
            href: MANAGE_USERS_HREF.to_string(),
            admin_only: true,
        });
    }

    items
}
