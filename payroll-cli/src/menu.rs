//! Interactive menu shell over the ledger.
//!
//! Single-threaded and synchronous: one prompt, one operation, back to
//! the menu. Every failure path prints a message and returns to the
//! menu; nothing here is fatal except losing stdin/stdout themselves.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use payroll_core::calculations::{CommissionInputs, CommissionSource, format_currency};
use payroll_core::{
    CloseOut, Invoice, InvoiceStatus, Ledger, NewInvoice, PayrollRepository, StatusChange,
};
use payroll_store::paths::DATE_FORMAT;
use rust_decimal::Decimal;

use crate::input;

type Lines = io::Lines<io::StdinLock<'static>>;

pub fn run<R: PayrollRepository>(ledger: &mut Ledger<R>) -> anyhow::Result<()> {
    let mut lines = io::stdin().lock().lines();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut lines, "Select an option: ")? else {
            break; // stdin closed
        };
        match choice.trim() {
            "1" => view_weekly_pay(ledger),
            "2" => view_ytd_pay(ledger),
            "3" => edit_employee(ledger, &mut lines)?,
            "4" => manage_invoices(ledger, &mut lines)?,
            "5" => view_archives(ledger, &mut lines)?,
            "6" => close_out_week(ledger, &mut lines)?,
            "7" => add_employee(ledger, &mut lines)?,
            "8" => print_help(),
            "9" | "q" | "Q" => break,
            "" => {}
            other => println!("Unrecognized option '{other}'."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("================ Payroll Tracker ================");
    println!(" 1) View weekly pay");
    println!(" 2) View year-to-date pay");
    println!(" 3) Edit employee");
    println!(" 4) Manage invoices");
    println!(" 5) View archived invoices");
    println!(" 6) Close out week");
    println!(" 7) Add employee");
    println!(" 8) Help");
    println!(" 9) Quit");
}

fn print_help() {
    println!(
        "\nHOW TO USE THE PAYROLL TRACKER\n\
         \n\
         Weekly pay accumulates the commission of every invoice added or\n\
         edited for an employee. Closing out a week records the payment\n\
         date, moves weekly pay into the year-to-date total, and archives\n\
         the week's invoices for later review.\n\
         \n\
         Commission per invoice:\n\
         - Credit card used:              (Total - Materials - Fees) / 2 + Tip\n\
         - No card, materials < $35.00:   (Total - Fees) / 2 + Tip\n\
         - No card, materials >= $35.00:  (Total - Materials - Fees) / 2 + Tip + Materials\n\
         \n\
         A manual commission override is offered when adding an invoice;\n\
         it stores the amount as given and zeroes the formula fields.\n\
         Dates are entered as MM/DD/YYYY."
    );
}

// ---------------------------------------------------------------------------
// Prompt helpers. `None` means stdin ended or the input was unusable; the
// calling flow aborts back to the menu with no partial state.
// ---------------------------------------------------------------------------

fn prompt(lines: &mut Lines, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn prompt_u32(lines: &mut Lines, label: &str) -> io::Result<Option<u32>> {
    let Some(line) = prompt(lines, label)? else {
        return Ok(None);
    };
    match line.trim().parse::<u32>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("Please enter a valid number.");
            Ok(None)
        }
    }
}

fn prompt_amount(lines: &mut Lines, label: &str, default: Decimal) -> io::Result<Option<Decimal>> {
    let Some(line) = prompt(lines, &format!("{label} [{}]: ", format_currency(default)))? else {
        return Ok(None);
    };
    if line.trim().is_empty() {
        return Ok(Some(default));
    }
    match input::parse_amount(&line) {
        Ok(amount) => Ok(Some(amount)),
        Err(err) => {
            println!("{err}");
            Ok(None)
        }
    }
}

/// Re-prompts until the date parses, per the fixed MM/DD/YYYY format.
/// Empty input takes the default.
fn prompt_date(
    lines: &mut Lines,
    label: &str,
    default: NaiveDate,
) -> io::Result<Option<NaiveDate>> {
    loop {
        let Some(line) = prompt(lines, &format!("{label} [{}]: ", default.format(DATE_FORMAT)))?
        else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            return Ok(Some(default));
        }
        match input::parse_date(&line) {
            Ok(date) => return Ok(Some(date)),
            Err(_) => println!("Please enter the date as MM/DD/YYYY."),
        }
    }
}

fn prompt_status(
    lines: &mut Lines,
    default: InvoiceStatus,
) -> io::Result<Option<InvoiceStatus>> {
    let Some(line) = prompt(
        lines,
        &format!("Status (Paid/Unpaid) [{}]: ", default.as_str()),
    )?
    else {
        return Ok(None);
    };
    if line.trim().is_empty() {
        return Ok(Some(default));
    }
    match input::parse_status(&line) {
        Some(status) => Ok(Some(status)),
        None => {
            println!("Please enter Paid or Unpaid.");
            Ok(None)
        }
    }
}

fn prompt_yes(lines: &mut Lines, label: &str) -> io::Result<Option<bool>> {
    Ok(prompt(lines, label)?.map(|line| input::parse_yes(&line)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prints the roster and asks for an id, validating it exists.
fn prompt_employee<R: PayrollRepository>(
    ledger: &Ledger<R>,
    lines: &mut Lines,
) -> io::Result<Option<u32>> {
    if ledger.employees().is_empty() {
        println!("No employees found.");
        return Ok(None);
    }
    for employee in ledger.employees() {
        println!("  {} - {}", employee.id, employee.name);
    }
    let Some(id) = prompt_u32(lines, "Employee id: ")? else {
        return Ok(None);
    };
    if ledger.employee(id).is_none() {
        println!("No employee with id {id}.");
        return Ok(None);
    }
    Ok(Some(id))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn view_weekly_pay<R: PayrollRepository>(ledger: &Ledger<R>) {
    let report = ledger.weekly_report();
    if report.rows.is_empty() {
        println!("No employees found.");
        return;
    }
    println!("\nWeekly Pay Report");
    println!("{:<6} {:<24} {:>12}", "ID", "Name", "Weekly Pay");
    for row in &report.rows {
        println!(
            "{:<6} {:<24} {:>12}",
            row.id,
            row.name,
            format!("${}", format_currency(row.weekly_pay))
        );
    }
    println!("Total weekly pay: ${}", format_currency(report.total));
}

fn view_ytd_pay<R: PayrollRepository>(ledger: &Ledger<R>) {
    let report = match ledger.ytd_report() {
        Ok(report) => report,
        Err(err) => {
            println!("Could not build the YTD report: {err}");
            return;
        }
    };
    if report.rows.is_empty() {
        println!("No employees found.");
        return;
    }
    println!("\nYear-To-Date Pay Report");
    println!(
        "{:<6} {:<24} {:>12} {:>14}",
        "ID", "Name", "YTD Pay", "Paid On"
    );
    for row in &report.rows {
        let paid_on = row
            .last_paid
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "Never Paid".to_string());
        println!(
            "{:<6} {:<24} {:>12} {:>14}",
            row.id,
            row.name,
            format!("${}", format_currency(row.year_to_date_pay)),
            paid_on
        );
    }
    println!("Total YTD pay: ${}", format_currency(report.total));
}

fn print_invoice_table(invoices: &[Invoice]) {
    println!(
        "{:<10} {:<20} {:<10} {:<8} {:>12} {:>12}",
        "Invoice#", "Customer", "Date", "Status", "Total", "Commission"
    );
    let mut sales = Decimal::ZERO;
    let mut commissions = Decimal::ZERO;
    for invoice in invoices {
        println!(
            "{:<10} {:<20} {:<10} {:<8} {:>12} {:>12}",
            invoice.number,
            invoice.customer,
            invoice.date.format(DATE_FORMAT),
            invoice.status.as_str(),
            format!("${}", format_currency(invoice.total)),
            format!("${}", format_currency(invoice.commission))
        );
        sales += invoice.total;
        commissions += invoice.commission;
    }
    println!(
        "Total invoices: {}  |  Total sales: ${}  |  Total commission: ${}",
        invoices.len(),
        format_currency(sales),
        format_currency(commissions)
    );
}

// ---------------------------------------------------------------------------
// Roster operations
// ---------------------------------------------------------------------------

fn add_employee<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
) -> io::Result<()> {
    let Some(id) = prompt_u32(lines, "Employee id: ")? else {
        return Ok(());
    };
    let Some(name) = prompt(lines, "Employee name: ")? else {
        return Ok(());
    };
    match ledger.add_employee(id, &name) {
        Ok(()) => println!("Employee {} (id {id}) added.", name.trim()),
        Err(err) => println!("Could not add employee: {err}"),
    }
    Ok(())
}

fn edit_employee<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
) -> io::Result<()> {
    let Some(id) = prompt_employee(ledger, lines)? else {
        return Ok(());
    };
    let Some(current) = ledger.employee(id).cloned() else {
        return Ok(());
    };

    let Some(new_id_line) = prompt(lines, &format!("New id [{}]: ", current.id))? else {
        return Ok(());
    };
    let new_id = if new_id_line.trim().is_empty() {
        current.id
    } else {
        match new_id_line.trim().parse::<u32>() {
            Ok(id) => id,
            Err(_) => {
                println!("Please enter a valid number.");
                return Ok(());
            }
        }
    };

    let Some(new_name_line) = prompt(lines, &format!("New name [{}]: ", current.name))? else {
        return Ok(());
    };
    let new_name = if new_name_line.trim().is_empty() {
        current.name.clone()
    } else {
        new_name_line
    };

    match ledger.update_employee(id, new_id, &new_name) {
        Ok(()) => println!("Employee updated to id {new_id}, name {}.", new_name.trim()),
        Err(err) => println!("Could not update employee: {err}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Invoice operations
// ---------------------------------------------------------------------------

fn manage_invoices<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
) -> io::Result<()> {
    let Some(id) = prompt_employee(ledger, lines)? else {
        return Ok(());
    };

    loop {
        println!("\n 1) List invoices");
        println!(" 2) Add invoice");
        println!(" 3) Edit invoice");
        println!(" 4) Mark paid/unpaid");
        println!(" 5) Back");
        let Some(choice) = prompt(lines, "Select an option: ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => list_invoices(ledger, id),
            "2" => add_invoice(ledger, lines, id)?,
            "3" => edit_invoice(ledger, lines, id)?,
            "4" => set_invoice_status(ledger, lines, id)?,
            "5" | "" => return Ok(()),
            other => println!("Unrecognized option '{other}'."),
        }
    }
}

fn list_invoices<R: PayrollRepository>(ledger: &Ledger<R>, id: u32) {
    match ledger.invoices(id) {
        Ok(invoices) if invoices.is_empty() => println!("No invoices in the active set."),
        Ok(invoices) => print_invoice_table(&invoices),
        Err(err) => println!("Could not read invoices: {err}"),
    }
}

fn prompt_commission_source(lines: &mut Lines) -> io::Result<Option<CommissionSource>> {
    let Some(manual) = prompt_yes(lines, "Manual commission override? (y/N): ")? else {
        return Ok(None);
    };
    if manual {
        let Some(amount) = prompt_amount(lines, "Manual commission amount", Decimal::ZERO)?
        else {
            return Ok(None);
        };
        return Ok(Some(CommissionSource::Manual(amount)));
    }

    let Some(credit_card_used) = prompt_yes(lines, "Credit card used? (y/N): ")? else {
        return Ok(None);
    };
    let Some(total) = prompt_amount(lines, "Total sale", Decimal::ZERO)? else {
        return Ok(None);
    };
    let Some(tip) = prompt_amount(lines, "Tip", Decimal::ZERO)? else {
        return Ok(None);
    };
    let Some(materials) = prompt_amount(lines, "Materials/parts", Decimal::ZERO)? else {
        return Ok(None);
    };
    let Some(fees) = prompt_amount(lines, "Fees", Decimal::ZERO)? else {
        return Ok(None);
    };
    Ok(Some(CommissionSource::Calculated(CommissionInputs {
        credit_card_used,
        total,
        tip,
        materials,
        fees,
    })))
}

fn add_invoice<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
    id: u32,
) -> io::Result<()> {
    let Some(number) = prompt(lines, "Invoice number: ")? else {
        return Ok(());
    };
    let Some(customer) = prompt(lines, "Customer: ")? else {
        return Ok(());
    };
    let Some(date) = prompt_date(lines, "Invoice date", today())? else {
        return Ok(());
    };
    let Some(status) = prompt_status(lines, InvoiceStatus::Paid)? else {
        return Ok(());
    };
    let Some(source) = prompt_commission_source(lines)? else {
        return Ok(());
    };

    match ledger.add_invoice(
        id,
        NewInvoice {
            number,
            customer,
            date,
            status,
            source,
        },
    ) {
        Ok(invoice) => println!(
            "Invoice #{} added. Commission: ${}",
            invoice.number,
            format_currency(invoice.commission)
        ),
        Err(err) => println!("Could not add invoice: {err}"),
    }
    Ok(())
}

fn edit_invoice<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
    id: u32,
) -> io::Result<()> {
    let invoices = match ledger.invoices(id) {
        Ok(invoices) => invoices,
        Err(err) => {
            println!("Could not read invoices: {err}");
            return Ok(());
        }
    };
    let Some(number) = prompt(lines, "Invoice number to edit: ")? else {
        return Ok(());
    };
    let number = number.trim().to_string();
    let Some(current) = invoices.iter().find(|i| i.number == number) else {
        println!("No invoice #{number} in the active set.");
        return Ok(());
    };

    println!(
        "Editing invoice #{} ({}, commission ${})",
        current.number,
        current.customer,
        format_currency(current.commission)
    );
    let Some(new_number_line) = prompt(lines, &format!("Invoice number [{}]: ", current.number))?
    else {
        return Ok(());
    };
    let new_number = if new_number_line.trim().is_empty() {
        current.number.clone()
    } else {
        new_number_line
    };
    let Some(new_customer_line) = prompt(lines, &format!("Customer [{}]: ", current.customer))?
    else {
        return Ok(());
    };
    let new_customer = if new_customer_line.trim().is_empty() {
        current.customer.clone()
    } else {
        new_customer_line
    };
    let Some(date) = prompt_date(lines, "Invoice date", current.date)? else {
        return Ok(());
    };
    let Some(status) = prompt_status(lines, current.status)? else {
        return Ok(());
    };
    // The table does not carry the card flag, so the edit asks again
    // rather than trusting a stored value.
    let Some(credit_card_used) = prompt_yes(lines, "Credit card used? (y/N): ")? else {
        return Ok(());
    };
    let Some(total) = prompt_amount(lines, "Total sale", current.total)? else {
        return Ok(());
    };
    let Some(tip) = prompt_amount(lines, "Tip", current.tip)? else {
        return Ok(());
    };
    let Some(materials) = prompt_amount(lines, "Materials/parts", current.materials)? else {
        return Ok(());
    };
    let Some(fees) = prompt_amount(lines, "Fees", current.fees)? else {
        return Ok(());
    };

    match ledger.update_invoice(
        id,
        &number,
        NewInvoice {
            number: new_number,
            customer: new_customer,
            date,
            status,
            source: CommissionSource::Calculated(CommissionInputs {
                credit_card_used,
                total,
                tip,
                materials,
                fees,
            }),
        },
    ) {
        Ok(invoice) => println!(
            "Invoice updated. New commission: ${}",
            format_currency(invoice.commission)
        ),
        Err(err) => println!("Could not update invoice: {err}"),
    }
    Ok(())
}

fn set_invoice_status<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
    id: u32,
) -> io::Result<()> {
    let Some(number) = prompt(lines, "Invoice number: ")? else {
        return Ok(());
    };
    let Some(line) = prompt(lines, "Mark as (P)aid or (U)npaid: ")? else {
        return Ok(());
    };
    let Some(status) = input::parse_status(&line) else {
        println!("Please enter Paid or Unpaid.");
        return Ok(());
    };
    let number = number.trim();

    match ledger.set_invoice_status(id, number, status) {
        Ok(StatusChange::Updated) => {
            println!("Invoice #{number} status changed to {}.", status.as_str());
        }
        Ok(StatusChange::AlreadySet) => {
            println!("Invoice #{number} is already marked as {}.", status.as_str());
        }
        Err(err) => println!("Could not change status: {err}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Archives and close-out
// ---------------------------------------------------------------------------

fn view_archives<R: PayrollRepository>(
    ledger: &Ledger<R>,
    lines: &mut Lines,
) -> io::Result<()> {
    let Some(id) = prompt_employee(ledger, lines)? else {
        return Ok(());
    };
    let weeks = match ledger.archives(id) {
        Ok(weeks) => weeks,
        Err(err) => {
            println!("Could not list archives: {err}");
            return Ok(());
        }
    };
    if weeks.is_empty() {
        println!("No archived invoices found.");
        return Ok(());
    }

    for (i, week) in weeks.iter().enumerate() {
        println!("  {}) Week ending: {}", i + 1, week.format(DATE_FORMAT));
    }
    let Some(pick) = prompt_u32(lines, "View which week? ")? else {
        return Ok(());
    };
    let Some(week) = (pick as usize)
        .checked_sub(1)
        .and_then(|i| weeks.get(i).copied())
    else {
        println!("No such entry.");
        return Ok(());
    };

    match ledger.archived_invoices(id, week) {
        Ok(invoices) => {
            println!("\nWeek ending {}", week.format(DATE_FORMAT));
            print_invoice_table(&invoices);
        }
        Err(err) => println!("Could not read the archive: {err}"),
    }
    Ok(())
}

fn close_out_week<R: PayrollRepository>(
    ledger: &mut Ledger<R>,
    lines: &mut Lines,
) -> io::Result<()> {
    let Some(id) = prompt_employee(ledger, lines)? else {
        return Ok(());
    };
    let Some(employee) = ledger.employee(id).cloned() else {
        return Ok(());
    };
    if employee.weekly_pay <= Decimal::ZERO {
        println!(
            "No commission or weekly pay to close out for {}.",
            employee.name
        );
        return Ok(());
    }
    println!(
        "Closing out {} with weekly pay ${}.",
        employee.name,
        format_currency(employee.weekly_pay)
    );
    let Some(payment_date) = prompt_date(lines, "Payment date", today())? else {
        return Ok(());
    };

    match ledger.close_out_week(id, payment_date) {
        Ok(CloseOut::Paid { amount }) => println!(
            "Weekly payout of ${} processed. Payment date {}. Weekly pay reset; invoices archived.",
            format_currency(amount),
            payment_date.format(DATE_FORMAT)
        ),
        Ok(CloseOut::NothingToPay) => println!("Nothing to pay out."),
        Err(err) => println!("Close-out failed: {err}"),
    }
    Ok(())
}
