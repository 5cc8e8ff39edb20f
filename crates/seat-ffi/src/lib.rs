//! C FFI bindings for seat-core
//!
//! This crate provides a C-compatible API so a native front end can submit
//! queries and render the matches or the table statistics.

use seat_core::{QueryRules, Roster, Seat, SeatFinder, TableStat};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// `sf_submit` result: the outcome is a list of matched seats
pub const SF_OUTCOME_MATCHES: i32 = 0;
/// `sf_submit` result: the outcome is the statistics view
pub const SF_OUTCOME_STATISTICS: i32 = 1;
/// `sf_submit` result: bad handle or query
pub const SF_OUTCOME_ERROR: i32 = -1;

/// Opaque handle to a seat finder session
pub struct FfiSeatFinder {
    inner: SeatFinder,
}

unsafe fn to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        None
    } else {
        CStr::from_ptr(s).to_str().ok()
    }
}

fn into_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

unsafe fn matched_seat<'a>(finder: *const FfiSeatFinder, index: usize) -> Option<&'a Seat> {
    if finder.is_null() {
        return None;
    }
    (*finder).inner.outcome().matches().get(index)
}

unsafe fn stat<'a>(finder: *const FfiSeatFinder, index: usize) -> Option<&'a TableStat> {
    if finder.is_null() {
        return None;
    }
    (*finder).inner.outcome().statistics().get(index)
}

/// Open a session over the bundled seating lists
///
/// Caller must free the handle with `sf_free`.
#[no_mangle]
pub extern "C" fn sf_open_bundled() -> *mut FfiSeatFinder {
    Box::into_raw(Box::new(FfiSeatFinder {
        inner: SeatFinder::bundled(),
    }))
}

/// Open a session over two seating CSV files
///
/// # Safety
/// - `primary` and `secondary` must be valid C strings
/// - Returns null on error
#[no_mangle]
pub unsafe extern "C" fn sf_open_files(
    primary: *const c_char,
    secondary: *const c_char,
) -> *mut FfiSeatFinder {
    let (primary, secondary) = match (to_str(primary), to_str(secondary)) {
        (Some(p), Some(s)) => (p, s),
        _ => return ptr::null_mut(),
    };

    match Roster::load(primary, secondary) {
        Ok(roster) => Box::into_raw(Box::new(FfiSeatFinder {
            inner: SeatFinder::new(roster, QueryRules::default()),
        })),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a session
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*` or null
#[no_mangle]
pub unsafe extern "C" fn sf_free(finder: *mut FfiSeatFinder) {
    if !finder.is_null() {
        drop(Box::from_raw(finder));
    }
}

/// Submit a query
///
/// Returns `SF_OUTCOME_MATCHES`, `SF_OUTCOME_STATISTICS` or `SF_OUTCOME_ERROR`.
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
/// - `query` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn sf_submit(finder: *mut FfiSeatFinder, query: *const c_char) -> i32 {
    if finder.is_null() {
        return SF_OUTCOME_ERROR;
    }
    let query = match to_str(query) {
        Some(q) => q,
        None => return SF_OUTCOME_ERROR,
    };

    if (*finder).inner.submit(query).is_statistics() {
        SF_OUTCOME_STATISTICS
    } else {
        SF_OUTCOME_MATCHES
    }
}

/// Get the number of matched seats for the last query
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
#[no_mangle]
pub unsafe extern "C" fn sf_match_count(finder: *const FfiSeatFinder) -> usize {
    if finder.is_null() {
        return 0;
    }
    (*finder).inner.outcome().matches().len()
}

/// Get a field of a matched seat
///
/// Fields: 0 = id, 1 = short key, 2 = table number, 3 = name, 4 = dietary note.
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
/// - Returns null if index or field is out of bounds
/// - Caller must free the returned string with `sf_free_string`
#[no_mangle]
pub unsafe extern "C" fn sf_match_field(
    finder: *const FfiSeatFinder,
    index: usize,
    field: usize,
) -> *mut c_char {
    let seat = match matched_seat(finder, index) {
        Some(s) => s,
        None => return ptr::null_mut(),
    };

    let value = match field {
        0 => &seat.id,
        1 => &seat.short_key,
        2 => &seat.table_number,
        3 => &seat.display_name,
        4 => &seat.dietary_note,
        _ => return ptr::null_mut(),
    };
    into_c_string(value)
}

/// Get the number of statistics buckets for the last query
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
#[no_mangle]
pub unsafe extern "C" fn sf_stat_count(finder: *const FfiSeatFinder) -> usize {
    if finder.is_null() {
        return 0;
    }
    (*finder).inner.outcome().statistics().len()
}

/// Get the meat headcount of a statistics bucket, 0 if out of bounds
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
#[no_mangle]
pub unsafe extern "C" fn sf_stat_meat(finder: *const FfiSeatFinder, index: usize) -> usize {
    stat(finder, index).map(|s| s.meat_count).unwrap_or(0)
}

/// Get the vegetarian headcount of a statistics bucket, 0 if out of bounds
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
#[no_mangle]
pub unsafe extern "C" fn sf_stat_vegetarian(finder: *const FfiSeatFinder, index: usize) -> usize {
    stat(finder, index)
        .map(|s| s.vegetarian_count)
        .unwrap_or(0)
}

/// Get the tables of a statistics bucket, joined with ", "
///
/// # Safety
/// - `finder` must be a valid pointer returned by `sf_open_*`
/// - Returns null if index is out of bounds
/// - Caller must free the returned string with `sf_free_string`
#[no_mangle]
pub unsafe extern "C" fn sf_stat_tables(finder: *const FfiSeatFinder, index: usize) -> *mut c_char {
    stat(finder, index)
        .map(|s| into_c_string(&s.tables.join(", ")))
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a sf_* function or null
#[no_mangle]
pub unsafe extern "C" fn sf_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
