/// NEPSE stock universe grouped by sector.

#[derive(Debug, PartialEq, Eq)]
pub struct StockInfo {
    pub symbol: &'static str,
    pub name: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Sector {
    pub name: &'static str,
    pub stocks: &'static [StockInfo],
}

const fn s(symbol: &'static str, name: &'static str) -> StockInfo {
    StockInfo { symbol, name }
}

pub const SECTORS: &[Sector] = &[
    Sector {
        name: "Commercial Banks",
        stocks: &[
            s("NABIL", "Nabil Bank Limited"),
            s("NICA", "NIC Asia Bank Limited"),
            s("GBIME", "Global IME Bank Limited"),
            s("EBL", "Everest Bank Limited"),
            s("NIMB", "Nepal Investment Mega Bank"),
            s("SCB", "Standard Chartered Bank Nepal"),
            s("SBI", "Nepal SBI Bank Limited"),
            s("SANIMA", "Sanima Bank Limited"),
            s("KBL", "Kumari Bank Limited"),
            s("PRVU", "Prabhu Bank Limited"),
            s("PCBL", "Prime Commercial Bank"),
            s("MBL", "Machhapuchhre Bank"),
            s("NMB", "NMB Bank Limited"),
            s("ADBL", "Agricultural Development Bank"),
            s("LBL", "Laxmi Sunrise Bank"),
            s("HBL", "Himalayan Bank Limited"),
            s("SBL", "Siddhartha Bank Limited"),
            s("CZNBSL", "Citizens Bank International"),
        ],
    },
    Sector {
        name: "Hydropower",
        stocks: &[
            s("UPPER", "Upper Tamakoshi Hydropower"),
            s("CHCL", "Chilime Hydropower Company"),
            s("SHPC", "Sanima Mai Hydropower"),
            s("BPCL", "Butwal Power Company"),
            s("AKJCL", "Ankhu Khola Jalvidhyut"),
            s("RHPL", "Rasuwagadhi Hydropower"),
            s("SJCL", "Sanjen Jalavidhyut"),
            s("HIDCL", "Hydroelectricity Investment and Development Co."),
            s("LEC", "Liberty Energy Company"),
            s("MEN", "Mountain Energy Nepal"),
            s("NGPL", "Ngadi Group Power"),
            s("API", "Api Power Company"),
            s("AHPC", "Arun Valley Hydropower"),
            s("AKPL", "Arun Kabeli Power"),
            s("UMHL", "United Modi Hydropower"),
            s("KPCL", "Kani Khola Jalvidhyut"),
            s("HPPL", "Himalayan Power Partner"),
        ],
    },
    Sector {
        name: "Life Insurance",
        stocks: &[
            s("NLIC", "Nepal Life Insurance Co."),
            s("LICN", "Life Insurance Corporation Nepal"),
            s("ALICL", "Asian Life Insurance"),
            s("CLI", "Citizen Life Insurance"),
            s("ILI", "IME Life Insurance"),
            s("SJLIC", "SuryaJyoti Life Insurance"),
            s("RNLI", "Reliable Nepal Life Insurance"),
            s("SNLI", "Sun Nepal Life Insurance"),
        ],
    },
    Sector {
        name: "Non-Life Insurance",
        stocks: &[
            s("NIL", "Neco Insurance Limited"),
            s("SICL", "Shikhar Insurance"),
            s("RBCL", "Rastriya Beema Company"),
            s("IGW", "IGI Prudential Insurance"),
            s("SALICO", "Sagarmatha Lumbini Insurance"),
            s("SGI", "Siddhartha Premier Insurance"),
            s("EIC", "Everest Insurance"),
        ],
    },
    Sector {
        name: "Microfinance",
        stocks: &[
            s("CBBL", "Chhimek Laghubitta"),
            s("SKBBL", "Sana Kisan Bikas Laghubitta"),
            s("NUBL", "Nirdhan Utthan Laghubitta"),
            s("DDBL", "Deprosc Laghubitta"),
            s("FOWAD", "Forward Microfinance"),
            s("MLBBL", "Mithila Laghubitta"),
            s("SWBBL", "Swabalamban Laghubitta"),
            s("NICLBSL", "NIC Asia Laghubitta"),
        ],
    },
    Sector {
        name: "Development Banks",
        stocks: &[
            s("MNBBL", "Muktinath Bikas Bank"),
            s("GBBL", "Garima Bikas Bank"),
            s("JBBL", "Jyoti Bikas Bank"),
            s("SHINE", "Shine Resunga Development Bank"),
            s("KSBBL", "Kamana Sewa Bikas Bank"),
            s("MLBL", "Mahalaxmi Bikas Bank"),
            s("LBL", "Lumbini Bikas Bank"),
        ],
    },
    Sector {
        name: "Finance",
        stocks: &[
            s("ICFC", "ICFC Finance Limited"),
            s("MFIL", "Manjushree Finance"),
            s("GFCL", "Goodwill Finance"),
            s("CFCL", "Central Finance"),
            s("GUFL", "Gurkhas Finance"),
        ],
    },
    Sector {
        name: "Manufacturing & Processing",
        stocks: &[
            s("HDL", "Himalayan Distillery"),
            s("SHIVM", "Shivam Cements"),
            s("UNL", "Unilever Nepal Limited"),
            s("BNL", "Bottlers Nepal (Lumbini)"),
            s("GCIL", "Ghorahi Cement Ghorahi"),
        ],
    },
    Sector {
        name: "Hotels & Tourism",
        stocks: &[
            s("SHL", "Soaltee Hotel Limited"),
            s("TRH", "Taragaon Regency Hotel"),
            s("OHL", "Oriental Hotels Limited"),
            s("CHL", "Chandragiri Hills"),
        ],
    },
    Sector {
        name: "Investment & Others",
        stocks: &[
            s("NTC", "Nepal Doorsanchar Company (Telecom)"),
            s("CIT", "Citizen Investment Trust"),
            s("NRIC", "Nepal Reinsurance Company"),
            s("NIFRA", "Nepal Infrastructure Bank"),
            s("HRL", "Himalayan Reinsurance"),
        ],
    },
    Sector {
        name: "Mutual Funds",
        stocks: &[
            s("NBF2", "Nabil Balanced Fund 2"),
            s("NIBSF2", "NIBL Sahabhagita Fund"),
            s("NICGF", "NIC Asia Growth Fund"),
        ],
    },
];

/// First listing of a symbol across all sectors.
pub fn find_stock(symbol: &str) -> Option<&'static StockInfo> {
    SECTORS
        .iter()
        .flat_map(|sec| sec.stocks.iter())
        .find(|st| st.symbol == symbol)
}

/// Sector that first lists `symbol`.
pub fn sector_of(symbol: &str) -> Option<&'static Sector> {
    SECTORS
        .iter()
        .find(|sec| sec.stocks.iter().any(|st| st.symbol == symbol))
}
