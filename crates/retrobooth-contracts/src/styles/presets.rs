use super::catalog::StyleSeed;

pub(crate) const BUILTIN_STYLES: &[StyleSeed] = &[
    StyleSeed {
        id: "80s",
        label: "80's Mall",
        directive: "Generate a classic 80s mall photography portrait of this specific person. CRITICAL PRIORITY: The face must look EXACTLY like the input photo. Do not alter facial features, eye shape, or nose. Apply a soft focus glamour shot aesthetic, cheesy laser background, and 80s style clothing/hair volume around the unchanged face.",
        accent: ("pink-500", "purple-500"),
        era: "1985",
        progress_messages: &[
            "TEASING YOUR HAIR...",
            "APPLYING BLUE EYESHADOW...",
            "ADJUSTING THE SHOULDER PADS...",
            "CHOOSING A LASER BACKGROUND...",
            "REWINDING THE CASSETTE TAPE...",
            "PEG ROLLING YOUR JEANS...",
            "DEVELOPING THE FILM...",
            "GETTING YOUR GLAMOUR SHOT READY...",
        ],
    },
    StyleSeed {
        id: "90s",
        label: "90's Grunge",
        directive: "Reimagine this person in a 90s grunge aesthetic. CRITICAL PRIORITY: Maintain absolute facial fidelity. The subject's identity must be preserved 100%. Use a lo-fi textured look, fisheye lens effect, and disposable camera grain, with flannel shirts and unkempt hair, but ensure the face remains instantly recognizable as the source.",
        accent: ("green-700", "gray-800"),
        era: "1994",
        progress_messages: &[
            "SMELLING LIKE TEEN SPIRIT...",
            "TYING FLANNEL SHIRT...",
            "DISTORTING GUITARS...",
            "LOOKING MOODY...",
            "DEVELOPING DISPOSABLE CAMERA...",
            "TUNING TO MTV...",
            "SKATEBOARDING IN SLOW MOTION...",
        ],
    },
    StyleSeed {
        id: "y2k",
        label: "Y2K Pop",
        directive: "Generate an early 2000s Y2K aesthetic portrait of this person. CRITICAL PRIORITY: Do not hallucinate a new face. Keep the subject's exact facial structure and likeness. Apply metallic silver clothing, tinted frameless sunglasses (optional if it obscures eyes), and frosty makeup. Bright overexposed flash and futuristic blue backgrounds.",
        accent: ("blue-400", "cyan-300"),
        era: "2001",
        progress_messages: &[
            "BOOTING UP WINDOWS XP...",
            "FROSTING TIPS...",
            "DIALING UP INTERNET...",
            "BURNING MIX CD...",
            "APPLYING LIP GLOSS...",
            "DOWNLOADING RINGTONES...",
            "ENTERING THE MATRIX...",
        ],
    },
    StyleSeed {
        id: "70s",
        label: "70's Disco",
        directive: "Generate a 1970s Disco era portrait of this person. CRITICAL PRIORITY: High fidelity to the source image is required. The face must remain identical to the uploaded photo. Dress them in sequins or polyester suits with warm colors and lens flares. Studio 54 vibe.",
        accent: ("yellow-500", "orange-600"),
        era: "1977",
        progress_messages: &[
            "POLISHING DISCO BALL...",
            "FLARING PANTS...",
            "IGNITING THE FUNK...",
            "APPLYING GLITTER...",
            "CUEING THE BEE GEES...",
            "HUSTLING...",
            "CHECKING INTO STUDIO 54...",
        ],
    },
    StyleSeed {
        id: "60s",
        label: "60's Psychedelic",
        directive: "Generate a 1960s psychedelic rock poster style portrait of this person. CRITICAL PRIORITY: The subject must be instantly recognizable. Do not distort the facial features even while applying the art style. Use tie-dye clothing, peace signs, kaleidoscope background, and vibrant swirling colors.",
        accent: ("orange-400", "pink-500"),
        era: "1967",
        progress_messages: &[
            "EXPANDING CONSCIOUSNESS...",
            "TYING DYE...",
            "TUNING IN...",
            "DROPPING OUT...",
            "PAINTING WITH LIGHT...",
            "GATHERING AT WOODSTOCK...",
            "SWIRLING COLORS...",
        ],
    },
    StyleSeed {
        id: "50s",
        label: "50's Diner",
        directive: "Generate a 1950s retro Americana portrait of this person. CRITICAL PRIORITY: Preserve the exact facial identity. The face must look like the source image. Apply Kodachrome film look, milkshakes, leather jackets or poodle skirts, and diner neon backgrounds.",
        accent: ("red-500", "teal-400"),
        era: "1955",
        progress_messages: &[
            "GREASING HAIR...",
            "POLISHING CHROME...",
            "SPINNING JUKEBOX...",
            "MIXING MILKSHAKE...",
            "IRONING POODLE SKIRT...",
            "WAXING THE HOT ROD...",
            "ROCKING AROUND THE CLOCK...",
        ],
    },
    StyleSeed {
        id: "noir",
        label: "Film Noir",
        directive: "Generate a 1940s Film Noir cinematic shot of this person. CRITICAL PRIORITY: Absolute likeness preservation. The facial features must remain unchanged. Use high contrast black and white photography, dramatic chiaroscuro shadows, and fedora/period hats.",
        accent: ("gray-800", "black"),
        era: "1945",
        progress_messages: &[
            "LIGHTING CIGARETTE...",
            "SHARPENING SHADOWS...",
            "SOLVING MYSTERIES...",
            "WALKING RAINY STREETS...",
            "ADJUSTING FEDORA...",
            "NARRATING INNER MONOLOGUE...",
            "FADING TO BLACK...",
        ],
    },
    StyleSeed {
        id: "victorian",
        label: "Victorian",
        directive: "Generate a vintage 19th-century Victorian daguerreotype of this person. CRITICAL PRIORITY: Keep the face exactly as is. Do not alter the subject's identity. Apply formal stiff poses, period clothing, serious expression, scratched texture, and vignette.",
        accent: ("amber-900", "amber-700"),
        era: "1890",
        progress_messages: &[
            "SITTING VERY STILL...",
            "STIFFENING COLLAR...",
            "APPLYING SEPIA TONE...",
            "POLISHING MONOCLE...",
            "ADJUSTING CORSET...",
            "PREPARING FLASH POWDER...",
            "LOOKING STOIC...",
        ],
    },
    StyleSeed {
        id: "goth",
        label: "Trad Goth",
        directive: "Generate a 1980s Traditional Goth subculture portrait of this person. CRITICAL PRIORITY: The face must match the source photo exactly, just with makeup applied. Do not change the bone structure. Pale complexion, heavy black eyeliner, teased black hair, fishnets, velvet.",
        accent: ("purple-900", "black"),
        era: "1983",
        progress_messages: &[
            "APPLYING PALE FOUNDATION...",
            "DARKENING SOUL...",
            "TEASING BLACK HAIR...",
            "PUTTING ON THE CURE...",
            "RIPPING FISHNETS...",
            "AVOIDING THE SUN...",
            "CONTEMPLATING EXISTENCE...",
        ],
    },
    StyleSeed {
        id: "cyberpunk",
        label: "Cyberpunk",
        directive: "Generate a futuristic Cyberpunk aesthetic portrait of this person. CRITICAL PRIORITY: Preserve the facial features and likeness of the subject. The face should be recognizable as the input. Add neon rain, bioluminescent accents, and subtle cybernetic enhancements to the sides (not obscuring the face).",
        accent: ("purple-600", "pink-600"),
        era: "2077",
        progress_messages: &[
            "INITIALIZING NEURAL LINK...",
            "INSTALLING CHROMIUM...",
            "HACKING MAINFRAME...",
            "CALIBRATING OPTICS...",
            "SYNCHRONIZING BRAINWAVES...",
            "ESCAPING DYSTOPIA...",
            "CHARGING NEON LIGHTS...",
        ],
    },
    StyleSeed {
        id: "steampunk",
        label: "Steampunk",
        directive: "Generate a Steampunk industrial fantasy portrait of this person. CRITICAL PRIORITY: Maintain exact facial identity. Do not change the person's face. Add brass goggles (on forehead), gears, leather corset or vest, and Victorian-industrial fusion elements.",
        accent: ("amber-700", "orange-900"),
        era: "1885",
        progress_messages: &[
            "OILING GEARS...",
            "PRESSURIZING STEAM...",
            "POLISHING BRASS...",
            "DONNING GOGGLES...",
            "WINDING CLOCKWORK...",
            "FIRING UP BOILER...",
            "INVENTING GADGETS...",
        ],
    },
    StyleSeed {
        id: "wildwest",
        label: "Wild West",
        directive: "Generate an Old West wanted poster style portrait of this person. CRITICAL PRIORITY: The face on the poster must be an exact match to the source image. Apply sepia, high grain, and worn paper texture, with cowboy hats and dusters.",
        accent: ("yellow-800", "yellow-900"),
        era: "1880",
        progress_messages: &[
            "SADDLING HORSE...",
            "LOADING REVOLVER...",
            "PRINTING WANTED POSTER...",
            "CHEWING TOBACCO...",
            "ENTERING SALOON...",
            "SPOTTING SHERIFF...",
            "RIDING INTO SUNSET...",
        ],
    },
    StyleSeed {
        id: "20s",
        label: "Roaring 20s",
        directive: "Generate a 1920s Gatsby era black and white photograph of this person. CRITICAL PRIORITY: High identity preservation required. The subject must look identical to the provided photo. Art deco elements, flapper dresses or tuxedos, soft grain, glamour.",
        accent: ("gray-200", "gray-500"),
        era: "1925",
        progress_messages: &[
            "POURING CHAMPAGNE...",
            "FLAPPING DRESS...",
            "PLAYING JAZZ...",
            "ROARING LOUDLY...",
            "DOING THE CHARLESTON...",
            "ATTENDING GATSBY'S PARTY...",
            "APPLYING ROUGE...",
        ],
    },
    StyleSeed {
        id: "vaporwave",
        label: "Vaporwave",
        directive: "Generate a Vaporwave aesthetic digital art portrait of this person. CRITICAL PRIORITY: The subject's face must be cut out and placed in the scene without altering their identity. Neon pink and cyan gradients, glitch effects, Roman statues, palm trees.",
        accent: ("pink-400", "cyan-400"),
        era: "2012",
        progress_messages: &[
            "SLOWING DOWN MUSIC...",
            "INSERTING ROMAN STATUE...",
            "GLITCHING REALITY...",
            "AESTHETIZING...",
            "DRINKING ARIZONA TEA...",
            "RENDERING GRID...",
            "EXPERIENCING NOSTALGIA...",
        ],
    },
    StyleSeed {
        id: "popart",
        label: "Pop Art",
        directive: "Generate a Pop Art portrait of this person. CRITICAL PRIORITY: Use the exact facial contours and features of the source image. Do not change the identity. Style it like Andy Warhol or Roy Lichtenstein with bold solid colors, halftone dots, and thick outlines.",
        accent: ("yellow-400", "red-500"),
        era: "1962",
        progress_messages: &[
            "DOTTING HALFTONES...",
            "COLORING BLOCKS...",
            "CANNING SOUP...",
            "PRINTING SILKSCREEN...",
            "ADDING BOLD OUTLINES...",
            "MASS PRODUCING...",
            "BECOMING FAMOUS FOR 15 MINS...",
        ],
    },
    StyleSeed {
        id: "anime",
        label: "90s Anime",
        directive: "Generate a 90s anime style character portrait based on this person. CRITICAL PRIORITY: The character must be instantly recognizable as the subject. Translate their specific facial features into the anime art style without losing their identity. Use cel shading, VHS grain, and dramatic lighting.",
        accent: ("blue-600", "purple-600"),
        era: "1995",
        progress_messages: &[
            "POWERING UP...",
            "DRAWING BIG EYES...",
            "ENGAGING SPEED LINES...",
            "CHARGING KI...",
            "OPENINGING INTRO THEME...",
            "DEFEATING VILLAIN...",
            "TRANSFORMING...",
        ],
    },
    StyleSeed {
        id: "clay",
        label: "Claymation",
        directive: "Generate a stop-motion claymation character portrait of this person. CRITICAL PRIORITY: The clay character must look exactly like the subject. Capture their specific nose, eyes, and mouth shape in plasticine texture. Fingerprints visible on clay, soft lighting, handmade feel.",
        accent: ("orange-300", "yellow-300"),
        era: "2005",
        progress_messages: &[
            "MOLDING PLASTICINE...",
            "MOVING ARMATURE...",
            "ANIMATING FRAME BY FRAME...",
            "SMOOTHING THUMBPRINTS...",
            "BUILDING MINIATURE SET...",
            "SCULPTING EXPRESSION...",
            "BAKING CLAY...",
        ],
    },
    StyleSeed {
        id: "viking",
        label: "Viking",
        directive: "Generate a rugged Viking warrior portrait of this person. CRITICAL PRIORITY: Preserve the facial features and likeness of the subject perfectly. Do not alter the face. Add fur cloaks, leather armor, snowy fjord background, and epic lighting.",
        accent: ("slate-600", "slate-800"),
        era: "850",
        progress_messages: &[
            "BRAIDING BEARD...",
            "SHARPENING AXE...",
            "SAILING LONGSHIP...",
            "PRAISING ODIN...",
            "DONNING FURS...",
            "NAVIGATING FJORDS...",
            "PREPARING FOR VALHALLA...",
        ],
    },
    StyleSeed {
        id: "renaissance",
        label: "Oil Painting",
        directive: "Generate a Renaissance oil painting of this person. CRITICAL PRIORITY: The subject of the painting must look exactly like the input photo. Maintain facial proportions and features. Use Chiaroscuro lighting, rich velvet textures, and a painted landscape background.",
        accent: ("yellow-600", "red-800"),
        era: "1500",
        progress_messages: &[
            "MIXING PIGMENTS...",
            "STUDYING ANATOMY...",
            "APPLYING VARNISH...",
            "PAINTING CHIAROSCURO...",
            "POSING REGALLY...",
            "COMMISSIONING ARTIST...",
            "DRYING CANVAS...",
        ],
    },
    StyleSeed {
        id: "pixel",
        label: "8-Bit Retro",
        directive: "Generate a pixel art portrait of this person. CRITICAL PRIORITY: The pixel character must be instantly recognizable as the user. Use the specific colors and shapes of their face. Vibrant colors, blocky structure, 8-bit/16-bit video game aesthetic.",
        accent: ("indigo-500", "purple-500"),
        era: "1988",
        progress_messages: &[
            "REDUCING RESOLUTION...",
            "BLOWING CARTRIDGE...",
            "INSERTING COIN...",
            "LOADING SPRITES...",
            "BEATING HIGH SCORE...",
            "LEVELING UP...",
            "SAVING GAME...",
        ],
    },
    StyleSeed {
        id: "egypt",
        label: "Ancient Pharaoh",
        directive: "Generate an Ancient Egyptian style portrait of this person. CRITICAL PRIORITY: Keep the facial features unchanged. The face must match the source image. Add gold headdress (Nemes), kohl eyeliner, hieroglyphs in background, sandstone texture.",
        accent: ("yellow-600", "amber-600"),
        era: "1300 BC",
        progress_messages: &[
            "BUILDING PYRAMID...",
            "DECIPHERING HIEROGLYPHS...",
            "APPLYING KOHL...",
            "WORSHIPPING RA...",
            "CARVING SANDSTONE...",
            "PREPARING SARCOPHAGUS...",
            "RULING THE NILE...",
        ],
    },
    StyleSeed {
        id: "fantasy",
        label: "High Fantasy",
        directive: "Generate a High Fantasy RPG character portrait of this person. CRITICAL PRIORITY: The face must remain identical to the user. Do not change facial structure. Add detailed armor or robes, magical aura, and ethereal lighting.",
        accent: ("emerald-600", "green-800"),
        era: "1200",
        progress_messages: &[
            "ROLLING INITIATIVE...",
            "POLISHING ARMOR...",
            "CASTING SPELL...",
            "SUMMONING DRAGON...",
            "EXPLORING DUNGEON...",
            "GATHERING MANA...",
            "EMBARKING ON QUEST...",
        ],
    },
    StyleSeed {
        id: "zombie",
        label: "Zombie Horror",
        directive: "Generate a horror movie style Zombie portrait of this person. CRITICAL PRIORITY: Preserve the facial features and likeness of the subject despite the undead transformation. They must be recognizable. Pale skin, sunken eyes, tattered clothes, cinematic horror lighting.",
        accent: ("green-900", "gray-900"),
        era: "2024",
        progress_messages: &[
            "INFECTING HOST...",
            "DECAYING FLESH...",
            "HUNGERING FOR BRAINS...",
            "RISING FROM GRAVE...",
            "STUMBLING SLOWLY...",
            "GROANING LOUDLY...",
            "AVOIDING HEADSHOTS...",
        ],
    },
    StyleSeed {
        id: "hero",
        label: "Super Hero",
        directive: "Generate a modern cinematic Superhero portrait of this person. CRITICAL PRIORITY: The superhero must have the exact face of the user. Identity preservation is key. Spandex or tactical suit, glowing energy effects, dramatic angle, blockbuster movie poster aesthetic.",
        accent: ("blue-600", "red-600"),
        era: "2025",
        progress_messages: &[
            "SEWING SPANDEX...",
            "CHARGING SUPERPOWERS...",
            "STRIKING HEROIC POSE...",
            "SAVING THE CITY...",
            "FIGHTING CRIME...",
            "FLYING UP UP AND AWAY...",
            "ASSEMBLING TEAM...",
        ],
    },
    StyleSeed {
        id: "ukiyoe",
        label: "Ukiyo-e Print",
        directive: "Generate a Japanese Ukiyo-e woodblock print style portrait of this person. CRITICAL PRIORITY: Capture the likeness of the subject within the art style. The face should be recognizable. Flat colors, bold outlines, traditional kimono, Great Wave off Kanagawa vibes.",
        accent: ("blue-800", "indigo-200"),
        era: "1830",
        progress_messages: &[
            "CARVING WOODBLOCK...",
            "INKING PLATES...",
            "PRESSING PAPER...",
            "PAINTING THE WAVE...",
            "DONNING KIMONO...",
            "VIEWING MT FUJI...",
            "ENTERING FLOATING WORLD...",
        ],
    },
    StyleSeed {
        id: "nouveau",
        label: "Art Nouveau",
        directive: "Generate an Art Nouveau style portrait of this person (Mucha style). CRITICAL PRIORITY: The face must remain photorealistic or near-photorealistic to the source. Do not alter features. Surround with intricate organic floral borders, pastel colors, flowing hair.",
        accent: ("amber-200", "orange-300"),
        era: "1900",
        progress_messages: &[
            "GROWING VINES...",
            "FLOWING HAIR...",
            "DECORATING BORDERS...",
            "STYLIZING NATURE...",
            "MIXING PASTELS...",
            "CHANNELING MUCHA...",
            "POSING ELEGANTLY...",
        ],
    },
    StyleSeed {
        id: "3dcartoon",
        label: "3D Cartoon",
        directive: "Generate a high-quality 3D animated movie character portrait of this person. CRITICAL PRIORITY: Translate the subject's exact facial features into the 3D style. They must be instantly recognizable. Big expressive eyes, soft subsurface scattering skin texture, warm lighting.",
        accent: ("sky-400", "blue-500"),
        era: "2023",
        progress_messages: &[
            "RENDERING MESH...",
            "CALCULATING SUBSURFACE...",
            "RIGGING SKELETON...",
            "ANIMATING EXPRESSION...",
            "WIDENING EYES...",
            "LIGHTING SCENE...",
            "WAITING FOR RENDER FARM...",
        ],
    },
    StyleSeed {
        id: "sketch",
        label: "Charcoal Sketch",
        directive: "Generate a charcoal or graphite pencil sketch portrait of this person. CRITICAL PRIORITY: The sketch must look exactly like the user. High identity preservation is required. Rough paper texture, strong contrast, smudged shading.",
        accent: ("gray-400", "gray-600"),
        era: "2020",
        progress_messages: &[
            "SHARPENING PENCIL...",
            "SMUDGING CHARCOAL...",
            "ERASING MISTAKES...",
            "SKETCHING CONTOURS...",
            "SHADING GRADIENTS...",
            "FIXING PAPER...",
            "SIGNING ARTWORK...",
        ],
    },
    StyleSeed {
        id: "astronaut",
        label: "Space Explorer",
        directive: "Generate a cinematic sci-fi Astronaut portrait of this person. CRITICAL PRIORITY: The face inside the helmet must be identical to the source image. Do not change the identity. Space helmet (visor open), NASA style suit, stars and nebula reflection.",
        accent: ("indigo-900", "blue-900"),
        era: "2150",
        progress_messages: &[
            "PRESSURIZING SUIT...",
            "CHECKING OXYGEN...",
            "LAUNCHING ROCKET...",
            "ENTERING ORBIT...",
            "OPENING POD BAY DOORS...",
            "FLOATING IN ZERO G...",
            "RADIOING HOUSTON...",
        ],
    },
];
