//! Fixed Seoul landmarks shown on the map page.

/// A named point of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub description: &'static str,
}

/// Map center (lat, lon): Seoul City Hall area.
pub const MAP_CENTER: (f64, f64) = (37.5665, 126.9780);

pub const LANDMARKS: [Landmark; 10] = [
    Landmark {
        name: "Gyeongbokgung Palace",
        lat: 37.579617,
        lon: 126.977041,
        description: "The main royal palace of the Joseon dynasty",
    },
    Landmark {
        name: "Myeongdong Street",
        lat: 37.563757,
        lon: 126.982684,
        description: "Shopping and street food",
    },
    Landmark {
        name: "N Seoul Tower (Namsan)",
        lat: 37.551169,
        lon: 126.988227,
        description: "Landmark observation tower",
    },
    Landmark {
        name: "Bukchon Hanok Village",
        lat: 37.582604,
        lon: 126.983998,
        description: "Traditional hanok houses among the modern city",
    },
    Landmark {
        name: "Hongdae Street",
        lat: 37.556327,
        lon: 126.922651,
        description: "Youth, music and street art",
    },
    Landmark {
        name: "Dongdaemun Design Plaza",
        lat: 37.566478,
        lon: 127.009105,
        description: "Futuristic architecture and design hub",
    },
    Landmark {
        name: "Lotte World Tower (Jamsil)",
        lat: 37.513068,
        lon: 127.102494,
        description: "Seoul's supertall skyscraper",
    },
    Landmark {
        name: "Itaewon",
        lat: 37.534855,
        lon: 126.994322,
        description: "Multicultural food and nightlife",
    },
    Landmark {
        name: "Cheonggyecheon Stream",
        lat: 37.569012,
        lon: 126.978388,
        description: "A restored stream through downtown",
    },
    Landmark {
        name: "Yeouido Hangang Park",
        lat: 37.528601,
        lon: 126.934174,
        description: "Riverside park along the Han",
    },
];

/// Longitude and latitude bounds covering every landmark, padded by `pad`
/// of the span on each side. Returned as `([lon_min, lon_max], [lat_min, lat_max])`.
pub fn bounds(pad: f64) -> ([f64; 2], [f64; 2]) {
    let (mut lon_min, mut lon_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut lat_min, mut lat_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for l in &LANDMARKS {
        lon_min = lon_min.min(l.lon);
        lon_max = lon_max.max(l.lon);
        lat_min = lat_min.min(l.lat);
        lat_max = lat_max.max(l.lat);
    }
    let lon_pad = (lon_max - lon_min) * pad;
    let lat_pad = (lat_max - lat_min) * pad;
    (
        [lon_min - lon_pad, lon_max + lon_pad],
        [lat_min - lat_pad, lat_max + lat_pad],
    )
}
