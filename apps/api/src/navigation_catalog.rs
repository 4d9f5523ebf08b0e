use stratum_core::AppResult;
use stratum_domain::NavItem;

type CatalogEntry = (&'static str, &'static str, &'static str, &'static str);

const VENDOR_ENTRIES: &[CatalogEntry] = &[
    ("vendors", "Vendors", "/vendors", "vendor:read"),
    ("vendor-onboarding", "Onboarding", "/vendors/new", "vendor:create"),
    ("purchase-orders", "Purchase orders", "/vendors/purchase-orders", "po:read"),
    ("po-approvals", "Approvals", "/vendors/purchase-orders/approvals", "po:approve"),
];

const INVENTORY_ENTRIES: &[CatalogEntry] = &[
    ("stock", "Stock", "/inventory/stock", "inventory:viewStock"),
    ("transfers", "Transfers", "/inventory/transfers", "inventory:transfer:create"),
    ("adjustments", "Adjustments", "/inventory/adjustments", "inventory:adjust"),
];

const SALES_ENTRIES: &[CatalogEntry] = &[
    ("orders", "Orders", "/sales/orders", "sales:read"),
    ("invoices", "Invoices", "/sales/invoices", "sales:invoice:read"),
    ("customers", "Customers", "/sales/customers", "sales:customer:read"),
];

const STORE_ENTRIES: &[CatalogEntry] = &[
    ("pos", "Point of sale", "/store/pos", "store:sell"),
    ("registers", "Registers", "/store/registers", "store:register:read"),
];

const HRMS_ENTRIES: &[CatalogEntry] = &[
    ("employees", "Employees", "/hrms/employees", "hrms:employee:read"),
    ("leave", "Leave", "/hrms/leave", "hrms:leave:approve"),
    ("payroll", "Payroll", "/hrms/payroll", "hrms:payroll:read"),
];

/// Builds the suite menu served to every caller before permission filtering.
pub fn default_navigation() -> AppResult<Vec<NavItem>> {
    Ok(vec![
        section("vendor", "Vendors", "vendor:read", VENDOR_ENTRIES)?,
        section("inventory", "Inventory", "inventory:read", INVENTORY_ENTRIES)?,
        section("sales", "Sales", "sales:read", SALES_ENTRIES)?,
        section("store", "Store", "store:read", STORE_ENTRIES)?,
        section("hrms", "People", "hrms:read", HRMS_ENTRIES)?,
        NavItem::new(
            "access-audit",
            "Access audit",
            Some("/settings/audit".to_owned()),
            "security:audit:read",
        )?,
    ])
}

fn section(
    key: &str,
    label: &str,
    permission: &str,
    entries: &[CatalogEntry],
) -> AppResult<NavItem> {
    let children = entries
        .iter()
        .map(|(key, label, href, permission)| {
            NavItem::new(*key, *label, Some((*href).to_owned()), permission)
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(NavItem::new(key, label, None, permission)?.with_children(children))
}
