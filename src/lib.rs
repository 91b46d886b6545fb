// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests import modules from this crate root to reach the code under test.
// - The binary in shell/main.rs builds the router from shell::state and shell::config.

pub mod core {
    pub mod event_store;
    pub mod plate_event;
    pub mod ports;
    pub mod presence;
    pub mod views;
}

pub mod application {
    pub mod errors;
    pub mod command_handlers {
        pub mod ingest_handler;
    }
    pub mod query_handlers {
        pub mod event_queries;
    }
}

pub mod adapters {
    pub mod clock;
    pub mod ids;
    pub mod in_memory {
        pub mod in_memory_event_ledger;
    }
    pub mod broadcast {
        pub mod noop_broadcaster;
        pub mod realtime_hub;
    }
    pub mod inbound {
        pub mod http {
            pub mod cameras;
            pub mod events;
            pub mod health;
            pub mod ingest;
            pub mod live;
        }
    }
}

pub mod shell;
