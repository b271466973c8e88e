pub mod application {
    pub mod cart {
        pub mod add_item;
        pub mod clear;
        pub mod get;
        pub mod merge;
        pub mod remove_item;
        pub mod set_quantity;
        pub mod stores;
        pub mod watch;
    }
    pub mod order {
        pub mod get_all;
        pub mod get_by_id;
        pub mod place;
    }
    pub mod recommendation {
        pub mod recommend;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod auth {
        pub mod errors;
        pub mod identity;
    }
    pub mod cart {
        pub mod authority;
        pub mod errors;
        pub mod model;
        pub mod mutation;
        pub mod reconciliation;
        pub mod repository;
        pub mod subscription;
        pub mod value_objects;
        pub mod use_cases {
            pub mod add_item;
            pub mod clear;
            pub mod get;
            pub mod merge;
            pub mod remove_item;
            pub mod set_quantity;
            pub mod watch;
        }
    }
    pub mod order {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod get_all;
            pub mod get_by_id;
            pub mod place;
        }
    }
    pub mod recommendation {
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod use_cases {
            pub mod recommend;
        }
    }
    pub mod shared {
        pub mod value_objects;
    }
}

#[cfg(test)]
mod test_support;
