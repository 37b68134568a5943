//! Resource paths under `/api/v1`.

pub const LOGIN: &str = "auth/login";
pub const CURRENT_USER: &str = "auth/users/me";
pub const USERS: &str = "auth/users";

pub const INVENTORY: &str = "inventory";
pub const STOCK_IN: &str = "inventory/stock-in";
pub const STOCK_OUT: &str = "inventory/stock-out";
pub const INVENTORY_STATS: &str = "inventory/stats";
pub const TRANSACTIONS: &str = "transactions";
pub const PERFORMANCE: &str = "performance";

pub const COMPANIES: &str = "companies";
pub const COMPANY_BALANCES: &str = "companies/balance";
pub const COMPANY_TOTAL_BALANCE: &str = "companies/total-balance";
pub const PAYMENTS: &str = "payments";

pub const FINANCE_TRANSACTIONS: &str = "finance/transactions";

pub const STOCK_ORDERS: &str = "stock-orders";

pub const LOGS: &str = "logs";
