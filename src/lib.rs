// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests import modules from this crate root to reach the code under test.

pub mod core {
    pub mod job;
    pub mod money;
    pub mod payment_record;
    pub mod ports;
    pub mod transition;
}

pub mod application {
    pub mod date_range;
    pub mod errors;
    pub mod ledger;
    pub mod lifecycle;
    pub mod reports;
}

pub mod adapters {
    pub mod in_memory {
        pub mod job_store;
        pub mod payment_record_store;
    }
}

pub mod shell;
