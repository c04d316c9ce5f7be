//! Demo listings.
//!
//! This is the one place sample records live: the `seed` command loads them
//! into a fresh database and the test suites build their fixtures from them.

use crate::types::internal::item::{ItemRecord, ItemStatus, NewItem};

/// Creation time of the newest sample record (2023-05-06T12:00:00Z)
const NEWEST_CREATED_AT: i64 = 1_683_374_400;

struct Sample {
    name: &'static str,
    status: ItemStatus,
    category: &'static str,
    location: &'static str,
    date: &'static str,
    image: Option<&'static str>,
    description: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "iPhone 13 Pro",
        status: ItemStatus::Lost,
        category: "electronics",
        location: "Central Park, Near Fountain",
        date: "2023-05-06",
        image: Some("https://images.unsplash.com/photo-1581091226825-a6a2a5aee158"),
        description: "Lost my iPhone 13 Pro with a blue case. Last seen near the central fountain.",
    },
    Sample {
        name: "Golden Retriever Dog",
        status: ItemStatus::Lost,
        category: "pets",
        location: "Downtown, Main Street",
        date: "2023-05-05",
        image: Some("https://images.unsplash.com/photo-1582562124811-c09040d0a901"),
        description: "Lost my golden retriever named Max. He has a red collar with contact information.",
    },
    Sample {
        name: "Car Keys with Red Keychain",
        status: ItemStatus::Found,
        category: "keys",
        location: "Shopping Mall, Food Court",
        date: "2023-05-04",
        image: None,
        description: "Found car keys with a distinctive red keychain and several keys attached.",
    },
    Sample {
        name: "Black Wallet",
        status: ItemStatus::Found,
        category: "accessories",
        location: "Bus Station, Platform 3",
        date: "2023-05-03",
        image: Some("https://images.unsplash.com/photo-1721322800607-8c38375eef04"),
        description: "Found a black leather wallet with credit cards and ID. No cash inside.",
    },
    Sample {
        name: "Prescription Glasses",
        status: ItemStatus::Lost,
        category: "accessories",
        location: "Library, Second Floor",
        date: "2023-05-02",
        image: None,
        description: "Lost my prescription glasses with tortoise shell frames. I need them to see!",
    },
    Sample {
        name: "MacBook Pro Laptop",
        status: ItemStatus::Lost,
        category: "electronics",
        location: "Coffee Shop on 5th Avenue",
        date: "2023-05-01",
        image: Some("https://images.unsplash.com/photo-1488590528505-98d2b5aba04b"),
        description: "Left my MacBook Pro (13-inch, 2019) at a coffee shop. It has stickers on the cover.",
    },
    Sample {
        name: "Diamond Engagement Ring",
        status: ItemStatus::Lost,
        category: "jewelry",
        location: "Beach, Near Lifeguard Station",
        date: "2023-04-30",
        image: None,
        description: "Lost my diamond engagement ring while swimming. It has huge sentimental value.",
    },
    Sample {
        name: "Blue Backpack",
        status: ItemStatus::Found,
        category: "bags",
        location: "Train Station, Platform 2",
        date: "2023-04-29",
        image: None,
        description: "Found a blue North Face backpack containing books and a water bottle.",
    },
];

/// Sample reports in newest-first order
pub fn sample_items() -> Vec<NewItem> {
    SAMPLES
        .iter()
        .map(|sample| NewItem {
            status: sample.status,
            name: sample.name.to_string(),
            category: sample.category.to_string(),
            location: sample.location.to_string(),
            occurred_on: sample.date.to_string(),
            occurred_time: None,
            image_url: sample.image.map(str::to_string),
            description: sample.description.to_string(),
            contact_name: "Lost & Found Desk".to_string(),
            contact_email: "desk@lostfound.example".to_string(),
            contact_phone: None,
        })
        .collect()
}

/// Creation timestamp assigned to the sample at `index`, one hour apart
pub fn sample_created_at(index: usize) -> i64 {
    NEWEST_CREATED_AT - (index as i64) * 3600
}

/// Sample reports as stored records, ids "1".."8"
pub fn sample_records() -> Vec<ItemRecord> {
    sample_items()
        .into_iter()
        .enumerate()
        .map(|(index, item)| ItemRecord {
            id: (index + 1).to_string(),
            status: item.status,
            name: item.name,
            category: item.category,
            location: item.location,
            occurred_on: item.occurred_on,
            occurred_time: item.occurred_time,
            image_url: item.image_url,
            description: item.description,
            user_id: None,
            contact_name: item.contact_name,
            contact_email: item.contact_email,
            contact_phone: item.contact_phone,
            created_at: sample_created_at(index),
        })
        .collect()
}
