pub mod employee;
pub mod invoice;
pub mod payment;

pub use employee::Employee;
pub use invoice::{Invoice, InvoiceStatus, NewInvoice};
pub use payment::PaymentRecord;
